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

//! Scene provisioning: the static ground, camera and light, and the
//! dynamic boxes paired body-to-mesh in the [`EntityTable`].

use boxfall_core::math::{degrees_to_radians, LinearRgba, Quat, Vec3, FRAC_PI_2};
use boxfall_core::physics::{
    ColliderDesc, ColliderShape, PhysicsMaterial, PhysicsProvider, RigidBodyDesc,
};
use boxfall_core::renderer::{Geometry, LambertMaterial, MeshDesc, RenderScene, SpotLight};
use boxfall_data::{BoxEntity, EntityTable, GroundPair, Scene};
use rand::Rng;

use crate::config::{DemoConfig, SpawnConfig};

/// What every spawned box shares: mass, surface response and color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxTemplate {
    pub mass: f32,
    pub material: PhysicsMaterial,
    pub color: LinearRgba,
}

impl Default for BoxTemplate {
    fn default() -> Self {
        Self {
            mass: 1.0,
            material: PhysicsMaterial::default(),
            color: LinearRgba::from_srgb_hex(0x2cbe4e),
        }
    }
}

impl BoxTemplate {
    pub fn from_config(config: &DemoConfig) -> Self {
        Self {
            mass: config.physics.box_mass,
            material: physics_material(config),
            color: LinearRgba::from_srgb_hex(config.scene.box_color),
        }
    }
}

fn physics_material(config: &DemoConfig) -> PhysicsMaterial {
    PhysicsMaterial {
        friction: config.physics.friction,
        restitution: config.physics.restitution,
    }
}

/// Builds the ground pair, configures the camera for a `viewport` sized
/// surface, and sets the light and clear color.
pub fn provision_static(
    physics: &mut dyn PhysicsProvider,
    scene: &mut Scene,
    config: &DemoConfig,
    viewport: (u32, u32),
) -> GroundPair {
    physics.set_gravity(config.physics.gravity);

    // The ground lies in XY locally; a quarter turn about X lays it flat,
    // facing +Y, for both the half-space and the plane mesh.
    let ground_rotation = Quat::from_axis_angle(Vec3::X, -FRAC_PI_2);
    let body = physics.add_body(RigidBodyDesc::fixed(Vec3::ZERO, ground_rotation));
    let collider = physics.add_collider(ColliderDesc {
        parent_body: Some(body),
        shape: ColliderShape::HalfSpace(Vec3::Z),
        mass: None,
        material: physics_material(config),
    });
    let mesh = scene.add_mesh(MeshDesc {
        geometry: Geometry::Plane {
            width: config.scene.ground_size,
            height: config.scene.ground_size,
        },
        material: LambertMaterial {
            color: LinearRgba::from_srgb_hex(config.scene.ground_color),
        },
        position: Vec3::ZERO,
        rotation: ground_rotation,
    });

    let camera = scene.camera_mut();
    camera.fov_y_radians = degrees_to_radians(config.camera.fov_y_degrees);
    camera.z_near = config.camera.z_near;
    camera.z_far = config.camera.z_far;
    camera.set_aspect_ratio(viewport.0, viewport.1);
    camera.look_at(config.camera.position, config.camera.target);
    camera.update_projection_matrix();

    scene.set_light(SpotLight {
        position: config.scene.light_position,
        target: config.scene.light_target,
        color: LinearRgba::from_srgb_hex(config.scene.light_color),
        intensity: config.scene.light_intensity,
        angle: degrees_to_radians(config.scene.light_angle_degrees),
        penumbra: config.scene.light_penumbra,
    });
    scene.set_clear_color(LinearRgba::from_srgb_hex(config.scene.clear_color));

    log::info!(
        "Static scene provisioned (ground {0}x{0})",
        config.scene.ground_size
    );
    GroundPair {
        body,
        collider,
        mesh,
    }
}

/// Creates one box of edge `size` at `position`: a dynamic body, its cube
/// collider and a cube mesh, appended as one row. Returns the row index.
pub fn spawn_box(
    physics: &mut dyn PhysicsProvider,
    scene: &mut Scene,
    table: &mut EntityTable,
    template: &BoxTemplate,
    position: Vec3,
    size: f32,
) -> usize {
    let body = physics.add_body(RigidBodyDesc::dynamic(position));
    let collider = physics.add_collider(ColliderDesc {
        parent_body: Some(body),
        shape: ColliderShape::cube(size),
        mass: Some(template.mass),
        material: template.material,
    });
    let mesh = scene.add_mesh(MeshDesc {
        geometry: Geometry::Cube { size },
        material: LambertMaterial {
            color: template.color,
        },
        position,
        rotation: Quat::IDENTITY,
    });
    table.push(BoxEntity {
        body,
        collider,
        mesh,
        size,
    })
}

/// Draws from `[low, high)`, or returns `low` when the span is empty.
fn sample_span<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

/// Spawns `spawn.box_count` boxes with random size and drop position.
///
/// Each box lands at `x = drop.x`, `y ∈ [drop.y, drop.y + height_jitter)`
/// and `z ∈ [drop.z - spread/2, drop.z + spread/2)`, with an edge length in
/// `[min_size, max_size)`.
pub fn spawn_boxes<R: Rng + ?Sized>(
    physics: &mut dyn PhysicsProvider,
    scene: &mut Scene,
    table: &mut EntityTable,
    spawn: &SpawnConfig,
    template: &BoxTemplate,
    rng: &mut R,
) {
    let drop = spawn.drop_point;
    let half_spread = spawn.depth_spread * 0.5;
    for _ in 0..spawn.box_count {
        let size = sample_span(rng, spawn.min_size, spawn.max_size);
        let position = Vec3::new(
            drop.x,
            sample_span(rng, drop.y, drop.y + spawn.height_jitter),
            sample_span(rng, drop.z - half_spread, drop.z + half_spread),
        );
        spawn_box(physics, scene, table, template, position, size);
    }
    log::info!("Spawned {} boxes", spawn.box_count);
}
