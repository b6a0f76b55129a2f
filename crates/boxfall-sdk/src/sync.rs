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

//! One-way copy of simulated transforms onto their meshes.

use boxfall_core::physics::PhysicsProvider;
use boxfall_core::renderer::RenderScene;
use boxfall_data::EntityTable;

/// The physics step, in seconds. Every frame advances the world by exactly
/// this much, whatever the measured frame interval.
pub const FIXED_TIME_STEP: f32 = 1.0 / 60.0;

/// Copies each body's position and orientation onto its paired mesh.
///
/// Returns the number of rows synchronized. Bodies are never written.
pub fn sync_transforms(
    physics: &dyn PhysicsProvider,
    scene: &mut dyn RenderScene,
    entities: &EntityTable,
) -> usize {
    let mut synced = 0;
    for row in entities {
        match physics.body_transform(row.body) {
            Some((position, rotation)) => {
                scene.set_mesh_transform(row.mesh, position, rotation);
                synced += 1;
            }
            None => log::warn!("sync_transforms: body {:?} has no transform", row.body),
        }
    }
    synced
}
