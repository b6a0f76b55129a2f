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

//! Conversions between the engine math types and nalgebra.

use boxfall_core::math::{Quat, Vec3};
use boxfall_core::physics::{ColliderHandle, RigidBodyHandle};
use rapier3d::na::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};
use rapier3d::prelude::Real;

pub fn to_rapier_vec(v: Vec3) -> Vector3<Real> {
    Vector3::new(v.x, v.y, v.z)
}

pub fn to_rapier_quat(q: Quat) -> UnitQuaternion<Real> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}

pub fn to_rapier_isometry(position: Vec3, rotation: Quat) -> Isometry3<Real> {
    Isometry3::from_parts(
        Translation3::new(position.x, position.y, position.z),
        to_rapier_quat(rotation),
    )
}

pub fn from_rapier_vec(v: &Vector3<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn from_rapier_quat(q: &UnitQuaternion<Real>) -> Quat {
    Quat::new(q.i, q.j, q.k, q.w)
}

// Handles pack the arena index in the low word and the generation in the
// high word, so a stale handle never aliases a recycled slot.

pub fn to_rapier_body(handle: RigidBodyHandle) -> rapier3d::dynamics::RigidBodyHandle {
    rapier3d::dynamics::RigidBodyHandle::from_raw_parts(handle.0 as u32, (handle.0 >> 32) as u32)
}

pub fn from_rapier_body(handle: rapier3d::dynamics::RigidBodyHandle) -> RigidBodyHandle {
    let (index, generation) = handle.into_raw_parts();
    RigidBodyHandle(((generation as u64) << 32) | index as u64)
}

pub fn to_rapier_collider(handle: ColliderHandle) -> rapier3d::geometry::ColliderHandle {
    rapier3d::geometry::ColliderHandle::from_raw_parts(handle.0 as u32, (handle.0 >> 32) as u32)
}

pub fn from_rapier_collider(handle: rapier3d::geometry::ColliderHandle) -> ColliderHandle {
    let (index, generation) = handle.into_raw_parts();
    ColliderHandle(((generation as u64) << 32) | index as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quaternion_component_order() {
        let q = Quat::from_axis_angle(Vec3::X, 0.5);
        let back = from_rapier_quat(&to_rapier_quat(q));
        approx::assert_relative_eq!(back.x, q.x, epsilon = 1e-6);
        approx::assert_relative_eq!(back.w, q.w, epsilon = 1e-6);
    }

    #[test]
    fn handle_keeps_generation() {
        let raw = rapier3d::dynamics::RigidBodyHandle::from_raw_parts(7, 3);
        let ours = from_rapier_body(raw);
        assert_eq!(ours.0, (3u64 << 32) | 7);
        assert_eq!(to_rapier_body(ours), raw);
    }
}
