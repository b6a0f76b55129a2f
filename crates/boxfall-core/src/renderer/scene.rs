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

//! Scene-level rendering types: geometry, materials, meshes and lights.

use serde::{Deserialize, Serialize};

use crate::math::{LinearRgba, Quat, Vec3, PI};

/// Opaque handle to a mesh inside a [`RenderScene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u32);

/// The primitive shapes the scene can draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// An axis-aligned cube centred on the origin with edge length `size`.
    Cube {
        /// Edge length.
        size: f32,
    },
    /// A plane in the local XY plane, facing +Z.
    Plane {
        /// Extent along X.
        width: f32,
        /// Extent along Y.
        height: f32,
    },
}

impl Geometry {
    /// The scale that maps the unit primitive onto this geometry.
    pub fn scale(&self) -> Vec3 {
        match *self {
            Geometry::Cube { size } => Vec3::splat(size),
            Geometry::Plane { width, height } => Vec3::new(width, height, 1.0),
        }
    }
}

/// A diffuse-only material, lit per fragment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LambertMaterial {
    /// Diffuse color in linear space.
    pub color: LinearRgba,
}

/// Description for creating a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDesc {
    /// The shape.
    pub geometry: Geometry,
    /// The surface.
    pub material: LambertMaterial,
    /// Initial position.
    pub position: Vec3,
    /// Initial rotation.
    pub rotation: Quat,
}

/// A spot light: a cone of light from `position` towards `target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    /// Light position in world space.
    pub position: Vec3,
    /// The point the cone is aimed at.
    pub target: Vec3,
    /// Light color.
    pub color: LinearRgba,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Half-angle of the cone, in radians.
    pub angle: f32,
    /// Fraction of the cone, from its edge inwards, over which the light fades.
    pub penumbra: f32,
}

impl SpotLight {
    /// Normalized direction from the light towards its target.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Cosine of the outer (fully dark) cone edge.
    pub fn cos_outer(&self) -> f32 {
        self.angle.cos()
    }

    /// Cosine of the inner (fully lit) cone edge.
    pub fn cos_inner(&self) -> f32 {
        (self.angle * (1.0 - self.penumbra)).cos()
    }
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 10.0, 0.0),
            target: Vec3::ZERO,
            color: LinearRgba::WHITE,
            intensity: 1.0,
            angle: PI / 3.0,
            penumbra: 0.0,
        }
    }
}

/// The retained render scene.
///
/// Meshes live for as long as the scene does; there is no removal.
pub trait RenderScene {
    /// Adds a mesh and returns its handle.
    fn add_mesh(&mut self, desc: MeshDesc) -> MeshHandle;

    /// Overwrites the position and rotation of a mesh.
    ///
    /// Unknown handles are ignored.
    fn set_mesh_transform(&mut self, handle: MeshHandle, position: Vec3, rotation: Quat);

    /// Returns the position and rotation of a mesh.
    fn mesh_transform(&self, handle: MeshHandle) -> Option<(Vec3, Quat)>;

    /// Returns the geometry of a mesh.
    fn mesh_geometry(&self, handle: MeshHandle) -> Option<Geometry>;

    /// Number of meshes in the scene.
    fn mesh_count(&self) -> usize;
}
