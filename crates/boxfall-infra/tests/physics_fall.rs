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

use boxfall_core::math::{Quat, Vec3, FRAC_PI_2};
use boxfall_core::physics::{
    ColliderDesc, ColliderShape, PhysicsMaterial, PhysicsProvider, RigidBodyDesc,
};
use boxfall_infra::physics::rapier::RapierPhysicsWorld;

const DT: f32 = 1.0 / 60.0;

fn ground(world: &mut RapierPhysicsWorld) {
    let rotation = Quat::from_axis_angle(Vec3::X, -FRAC_PI_2);
    let body = world.add_body(RigidBodyDesc::fixed(Vec3::ZERO, rotation));
    world.add_collider(ColliderDesc {
        parent_body: Some(body),
        shape: ColliderShape::HalfSpace(Vec3::Z),
        mass: None,
        material: PhysicsMaterial::default(),
    });
}

fn cube(world: &mut RapierPhysicsWorld, position: Vec3, size: f32) -> boxfall_core::physics::RigidBodyHandle {
    let body = world.add_body(RigidBodyDesc::dynamic(position));
    world.add_collider(ColliderDesc {
        parent_body: Some(body),
        shape: ColliderShape::cube(size),
        mass: Some(1.0),
        material: PhysicsMaterial::default(),
    });
    body
}

#[test]
fn free_fall_follows_gravity() {
    let mut world = RapierPhysicsWorld::new();
    let body = cube(&mut world, Vec3::new(0.0, 100.0, 0.0), 1.0);

    for _ in 0..60 {
        world.step(DT);
    }

    let (position, _) = world.body_transform(body).unwrap();
    // Semi-implicit Euler lands a bit below the analytic 100 - g/2.
    let fallen = 100.0 - position.y;
    assert!(fallen > 4.5 && fallen < 5.5, "fell {fallen}");
    assert_eq!(position.x, 0.0);
    assert_eq!(position.z, 0.0);
}

#[test]
fn rotated_half_space_is_the_ground() {
    let mut world = RapierPhysicsWorld::new();
    ground(&mut world);
    let body = cube(&mut world, Vec3::new(0.0, 50.0, 0.0), 2.0);

    for _ in 0..(60 * 10) {
        world.step(DT);
    }

    let (position, _) = world.body_transform(body).unwrap();
    assert!(
        (position.y - 1.0).abs() < 0.1,
        "cube should rest on y = 0 with its centre at 1.0, got {}",
        position.y
    );
}

#[test]
fn counts_track_insertions() {
    let mut world = RapierPhysicsWorld::new();
    ground(&mut world);
    for i in 0..4 {
        cube(&mut world, Vec3::new(i as f32 * 3.0, 10.0, 0.0), 1.0);
    }
    assert_eq!(world.body_count(), 5);
    assert_eq!(world.collider_count(), 5);
}

#[test]
fn gravity_is_settable() {
    let mut world = RapierPhysicsWorld::with_gravity(Vec3::ZERO);
    assert_eq!(world.gravity(), Vec3::ZERO);
    let body = cube(&mut world, Vec3::new(0.0, 10.0, 0.0), 1.0);
    for _ in 0..30 {
        world.step(DT);
    }
    let (position, rotation) = world.body_transform(body).unwrap();
    assert_eq!(position, Vec3::new(0.0, 10.0, 0.0));
    assert_eq!(rotation, Quat::IDENTITY);
}
