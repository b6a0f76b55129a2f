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

//! Provides a Quaternion type for representing 3D rotations.

use serde::{Deserialize, Serialize};
use std::ops::Mul;

use super::{Vec3, EPSILON};

/// Represents a quaternion for 3D rotations.
///
/// Stored as `(x, y, z, w)`, where `[x, y, z]` is the vector part and `w` is
/// the scalar part. Orientations read back from the physics world are unit
/// quaternions and are copied bit-for-bit into the render scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion representing a rotation of `angle_radians` around `axis`.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let axis = axis.normalize();
        let (s, c) = (angle_radians * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Returns the squared magnitude.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Returns a unit-length copy, or [`Quaternion::IDENTITY`] when degenerate.
    #[inline]
    pub fn normalize(&self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > EPSILON * EPSILON {
            let inv = 1.0 / len_sq.sqrt();
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }

    /// Returns the conjugate, which is the inverse for unit quaternions.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotates a vector by this quaternion.
    #[inline]
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        // v' = v + 2w(q x v) + 2 q x (q x v)
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Self;

    /// Hamilton product: `a * b` applies `b` first, then `a`.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate_vec3(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;
    use approx::assert_relative_eq;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = EPSILON * 10.0);
        assert_relative_eq!(a.y, b.y, epsilon = EPSILON * 10.0);
        assert_relative_eq!(a.z, b.z, epsilon = EPSILON * 10.0);
    }

    #[test]
    fn test_identity_leaves_vectors_alone() {
        let v = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(Quaternion::IDENTITY * v, v);
    }

    #[test]
    fn test_quarter_turn_about_x_maps_z_to_y() {
        // The ground plane is authored in XY with a +Z normal, then tipped
        // by -90 degrees about X so that it faces +Y.
        let q = Quaternion::from_axis_angle(Vec3::X, -FRAC_PI_2);
        assert_vec3_eq(q * Vec3::Z, Vec3::Y);
    }

    #[test]
    fn test_composition_order() {
        let yaw = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let pitch = Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2);
        // pitch first, then yaw
        let combined = yaw * pitch;
        assert_vec3_eq(combined * Vec3::Z, yaw * (pitch * Vec3::Z));
    }

    #[test]
    fn test_normalize_degenerate() {
        let q = Quaternion::new(0.0, 0.0, 0.0, 0.0).normalize();
        assert_eq!(q, Quaternion::IDENTITY);
        let q = Quaternion::new(0.0, 0.0, 0.0, 2.0).normalize();
        assert_relative_eq!(q.w, 1.0);
    }
}
