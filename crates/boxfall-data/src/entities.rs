// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pairing of physics bodies with the meshes that display them.

use boxfall_core::physics::{ColliderHandle, RigidBodyHandle};
use boxfall_core::renderer::MeshHandle;

/// One falling box: its body, collider and mesh, plus its edge length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxEntity {
    /// The dynamic body driving the box.
    pub body: RigidBodyHandle,
    /// The cube collider attached to `body`.
    pub collider: ColliderHandle,
    /// The mesh that mirrors `body`.
    pub mesh: MeshHandle,
    /// Edge length, shared by collider and mesh.
    pub size: f32,
}

/// The static ground: a half-space collider and a large plane mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPair {
    /// The static body.
    pub body: RigidBodyHandle,
    /// The half-space collider.
    pub collider: ColliderHandle,
    /// The plane mesh.
    pub mesh: MeshHandle,
}

/// Append-only table of every box in the demo.
///
/// Row `i` holds the `i`th box spawned; rows are never removed or reordered.
#[derive(Debug, Clone, Default)]
pub struct EntityTable {
    rows: Vec<BoxEntity>,
}

impl EntityTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `capacity` rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Appends a row and returns its index.
    pub fn push(&mut self, entity: BoxEntity) -> usize {
        self.rows.push(entity);
        self.rows.len() - 1
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` if no box has been spawned yet.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row at `index`.
    pub fn get(&self, index: usize) -> Option<&BoxEntity> {
        self.rows.get(index)
    }

    /// Iterates over the rows in spawn order.
    pub fn iter(&self) -> std::slice::Iter<'_, BoxEntity> {
        self.rows.iter()
    }

    /// Body handles in spawn order.
    pub fn bodies(&self) -> impl Iterator<Item = RigidBodyHandle> + '_ {
        self.rows.iter().map(|row| row.body)
    }

    /// Mesh handles in spawn order.
    pub fn meshes(&self) -> impl Iterator<Item = MeshHandle> + '_ {
        self.rows.iter().map(|row| row.mesh)
    }
}

impl<'a> IntoIterator for &'a EntityTable {
    type Item = &'a BoxEntity;
    type IntoIter = std::slice::Iter<'a, BoxEntity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
