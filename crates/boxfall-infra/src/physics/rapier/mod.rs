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

//! Rapier implementation of the physics provider.

mod conversions;

use boxfall_core::math::{Quat, Vec3};
use boxfall_core::physics::{
    BodyType, ColliderDesc, ColliderHandle, ColliderShape, PhysicsProvider, RigidBodyDesc,
    RigidBodyHandle,
};
use rapier3d::na::Unit;
use rapier3d::prelude::*;

use self::conversions::{
    from_rapier_body, from_rapier_collider, from_rapier_quat, from_rapier_vec, to_rapier_body,
    to_rapier_collider, to_rapier_isometry, to_rapier_vec,
};

/// Earth gravity along -Y, in m/s².
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.82, 0.0);

/// Implementation of the `PhysicsProvider` trait using the Rapier3D physics engine.
pub struct RapierPhysicsWorld {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl Default for RapierPhysicsWorld {
    fn default() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: to_rapier_vec(DEFAULT_GRAVITY),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }
}

impl RapierPhysicsWorld {
    /// Creates an empty world with [`DEFAULT_GRAVITY`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty world with the given gravity.
    pub fn with_gravity(gravity: Vec3) -> Self {
        let mut world = Self::default();
        world.set_gravity(gravity);
        world
    }
}

impl PhysicsProvider for RapierPhysicsWorld {
    fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = to_rapier_vec(gravity);
    }

    fn gravity(&self) -> Vec3 {
        from_rapier_vec(&self.gravity)
    }

    fn add_body(&mut self, desc: RigidBodyDesc) -> RigidBodyHandle {
        let rb_type = match desc.body_type {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Static => RigidBodyType::Fixed,
            BodyType::Kinematic => RigidBodyType::KinematicPositionBased,
        };

        let rigid_body = RigidBodyBuilder::new(rb_type)
            .position(to_rapier_isometry(desc.position, desc.rotation))
            .build();

        from_rapier_body(self.rigid_body_set.insert(rigid_body))
    }

    fn add_collider(&mut self, desc: ColliderDesc) -> ColliderHandle {
        let shape = match desc.shape {
            ColliderShape::Cuboid(half) => SharedShape::cuboid(half.x, half.y, half.z),
            ColliderShape::Ball(radius) => SharedShape::ball(radius),
            ColliderShape::HalfSpace(normal) => {
                SharedShape::halfspace(Unit::new_normalize(to_rapier_vec(normal)))
            }
        };

        let mut builder = ColliderBuilder::new(shape)
            .friction(desc.material.friction)
            .restitution(desc.material.restitution);
        if let Some(mass) = desc.mass {
            builder = builder.mass(mass);
        }
        let collider = builder.build();

        match desc.parent_body {
            Some(parent) => {
                let rb_handle = to_rapier_body(parent);
                if !self.rigid_body_set.contains(rb_handle) {
                    log::warn!("add_collider: unknown parent body {parent:?}, inserting detached");
                    return from_rapier_collider(self.collider_set.insert(collider));
                }
                let handle = self.collider_set.insert_with_parent(
                    collider,
                    rb_handle,
                    &mut self.rigid_body_set,
                );
                if let Some(rb) = self.rigid_body_set.get_mut(rb_handle) {
                    rb.recompute_mass_properties_from_colliders(&self.collider_set);
                }
                from_rapier_collider(handle)
            }
            None => from_rapier_collider(self.collider_set.insert(collider)),
        }
    }

    fn body_transform(&self, handle: RigidBodyHandle) -> Option<(Vec3, Quat)> {
        self.rigid_body_set
            .get(to_rapier_body(handle))
            .map(|rb| (from_rapier_vec(rb.translation()), from_rapier_quat(rb.rotation())))
    }

    fn body_mass(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.rigid_body_set.get(to_rapier_body(handle)).map(|rb| rb.mass())
    }

    fn collider_shape(&self, handle: ColliderHandle) -> Option<ColliderShape> {
        let collider = self.collider_set.get(to_rapier_collider(handle))?;
        let shape = collider.shape();
        if let Some(cuboid) = shape.as_cuboid() {
            Some(ColliderShape::Cuboid(from_rapier_vec(&cuboid.half_extents)))
        } else if let Some(ball) = shape.as_ball() {
            Some(ColliderShape::Ball(ball.radius))
        } else {
            shape
                .as_halfspace()
                .map(|hs| ColliderShape::HalfSpace(from_rapier_vec(&hs.normal)))
        }
    }

    fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    fn collider_count(&self) -> usize {
        self.collider_set.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxfall_core::physics::PhysicsMaterial;

    fn cube_on(world: &mut RapierPhysicsWorld, position: Vec3, size: f32) -> RigidBodyHandle {
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
    fn test_default_gravity() {
        let world = RapierPhysicsWorld::new();
        assert_eq!(world.gravity(), Vec3::new(0.0, -9.82, 0.0));
    }

    #[test]
    fn test_explicit_mass_overrides_volume() {
        let mut world = RapierPhysicsWorld::new();
        let body = cube_on(&mut world, Vec3::new(0.0, 10.0, 0.0), 3.0);
        let mass = world.body_mass(body).unwrap_or_default();
        approx::assert_relative_eq!(mass, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_unknown_handle_reads_none() {
        let world = RapierPhysicsWorld::new();
        assert!(world.body_transform(RigidBodyHandle(42)).is_none());
        assert!(world.collider_shape(ColliderHandle(42)).is_none());
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut world = RapierPhysicsWorld::new();
        let body = cube_on(&mut world, Vec3::new(0.0, 10.0, 0.0), 1.0);
        world.step(0.0);
        assert_eq!(
            world.body_transform(body),
            Some((Vec3::new(0.0, 10.0, 0.0), Quat::IDENTITY))
        );
    }
}
