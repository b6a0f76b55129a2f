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

//! # Physics Abstractions
//!
//! Traits and types describing the physics world the demo drives. The world
//! itself (broad-phase, narrow-phase, integration) is supplied by a provider
//! crate; see `boxfall-infra` for the Rapier implementation.

use serde::{Deserialize, Serialize};

use crate::math::{Quat, Vec3};

/// Opaque handle to a rigid body in the physics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RigidBodyHandle(pub u64);

/// Opaque handle to a collider in the physics engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderHandle(pub u64);

/// Defines the type of a rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    /// Responds to forces and collisions.
    Dynamic,
    /// Fixed in place, does not move. Equivalent to a zero-mass body.
    Static,
    /// Moved by the user, not by forces.
    Kinematic,
}

/// Description for creating a rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyDesc {
    /// Initial position.
    pub position: Vec3,
    /// Initial rotation.
    pub rotation: Quat,
    /// Body type.
    pub body_type: BodyType,
}

impl RigidBodyDesc {
    /// A dynamic body at `position` with no rotation.
    pub fn dynamic(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            body_type: BodyType::Dynamic,
        }
    }

    /// A static body with the given pose.
    pub fn fixed(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            body_type: BodyType::Static,
        }
    }
}

/// Supported collider shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Box with half-extents.
    Cuboid(Vec3),
    /// Sphere with radius.
    Ball(f32),
    /// Infinite plane; everything on the far side of the outward normal
    /// (expressed in the collider's local frame) is solid.
    HalfSpace(Vec3),
}

impl ColliderShape {
    /// A cube whose edge length is `size`.
    pub fn cube(size: f32) -> Self {
        ColliderShape::Cuboid(Vec3::splat(size * 0.5))
    }
}

/// Surface response of a collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    /// Coulomb friction coefficient.
    pub friction: f32,
    /// Restitution (bounciness) coefficient.
    pub restitution: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            friction: 0.3,
            restitution: 0.0,
        }
    }
}

/// Description for creating a collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColliderDesc {
    /// Associated rigid body if any.
    pub parent_body: Option<RigidBodyHandle>,
    /// Shape description.
    pub shape: ColliderShape,
    /// Explicit mass contributed by this collider. `None` derives the mass
    /// from the shape volume at unit density.
    pub mass: Option<f32>,
    /// Surface material.
    pub material: PhysicsMaterial,
}

/// Interface contract for any physics engine implementation (e.g., Rapier).
pub trait PhysicsProvider: Send + Sync {
    /// Advances the simulation by `dt` seconds.
    fn step(&mut self, dt: f32);

    /// Sets the global gravity vector.
    fn set_gravity(&mut self, gravity: Vec3);

    /// Returns the global gravity vector.
    fn gravity(&self) -> Vec3;

    /// Adds a rigid body to the simulation.
    fn add_body(&mut self, desc: RigidBodyDesc) -> RigidBodyHandle;

    /// Adds a collider to the simulation, attached to `desc.parent_body` when set.
    fn add_collider(&mut self, desc: ColliderDesc) -> ColliderHandle;

    /// Reads back the current position and rotation of a rigid body.
    ///
    /// Returns `None` for a handle the world does not know.
    fn body_transform(&self, handle: RigidBodyHandle) -> Option<(Vec3, Quat)>;

    /// Returns the total mass of a rigid body.
    fn body_mass(&self, handle: RigidBodyHandle) -> Option<f32>;

    /// Returns the shape of a collider.
    fn collider_shape(&self, handle: ColliderHandle) -> Option<ColliderShape>;

    /// Number of rigid bodies in the world.
    fn body_count(&self) -> usize;

    /// Number of colliders in the world.
    fn collider_count(&self) -> usize;
}
