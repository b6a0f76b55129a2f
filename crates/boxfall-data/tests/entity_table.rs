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

use boxfall_core::math::{LinearRgba, Quat, Vec3};
use boxfall_core::physics::{ColliderHandle, RigidBodyHandle};
use boxfall_core::renderer::{Geometry, LambertMaterial, MeshDesc, RenderScene};
use boxfall_data::{BoxEntity, EntityTable, Scene};

fn spawn(table: &mut EntityTable, scene: &mut Scene, i: u64, size: f32) -> usize {
    let mesh = scene.add_mesh(MeshDesc {
        geometry: Geometry::Cube { size },
        material: LambertMaterial {
            color: LinearRgba::from_srgb_hex(0x2cbe4e),
        },
        position: Vec3::new(0.0, 50.0 + i as f32, 0.0),
        rotation: Quat::IDENTITY,
    });
    table.push(BoxEntity {
        body: RigidBodyHandle(i),
        collider: ColliderHandle(i),
        mesh,
        size,
    })
}

#[test]
fn rows_keep_spawn_order() {
    let mut table = EntityTable::with_capacity(3);
    let mut scene = Scene::default();
    assert!(table.is_empty());

    for i in 0..3 {
        let row = spawn(&mut table, &mut scene, i, 1.0 + i as f32 * 0.5);
        assert_eq!(row, i as usize);
    }

    assert_eq!(table.len(), 3);
    let bodies: Vec<_> = table.bodies().map(|h| h.0).collect();
    assert_eq!(bodies, vec![0, 1, 2]);
    let meshes: Vec<_> = table.meshes().map(|h| h.0).collect();
    assert_eq!(meshes, vec![0, 1, 2]);
    assert_eq!(table.get(1).map(|r| r.size), Some(1.5));
    assert!(table.get(3).is_none());
}

#[test]
fn every_row_mesh_matches_its_size() {
    let mut table = EntityTable::new();
    let mut scene = Scene::default();
    for i in 0..5 {
        spawn(&mut table, &mut scene, i, 2.0);
    }
    for row in &table {
        assert_eq!(
            scene.mesh_geometry(row.mesh),
            Some(Geometry::Cube { size: row.size })
        );
    }
}
