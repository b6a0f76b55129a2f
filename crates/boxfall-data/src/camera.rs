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

use boxfall_core::math::{Mat4, Vec3};
use boxfall_core::renderer::ViewInfo;

/// A perspective camera that looks at a target point.
///
/// The projection matrix is cached; after changing `fov_y_radians`,
/// `aspect_ratio`, `z_near` or `z_far` call
/// [`update_projection_matrix`](Self::update_projection_matrix) for the
/// change to reach the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// The vertical field of view in radians.
    pub fov_y_radians: f32,

    /// The aspect ratio of the viewport (width / height).
    pub aspect_ratio: f32,

    /// The distance to the near clipping plane.
    pub z_near: f32,

    /// The distance to the far clipping plane.
    pub z_far: f32,

    /// Camera position in world space.
    pub position: Vec3,

    /// The point the camera looks at.
    pub target: Vec3,

    /// World up direction.
    pub up: Vec3,

    projection: Mat4,
}

impl PerspectiveCamera {
    /// Creates a new perspective camera at the origin looking down -Z.
    pub fn new(fov_y_radians: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        let mut camera = Self {
            fov_y_radians,
            aspect_ratio,
            z_near,
            z_far,
            position: Vec3::ZERO,
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Moves the camera and aims it at `target`.
    pub fn look_at(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    /// Recomputes the cached projection matrix from the current parameters.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh_zo(self.fov_y_radians, self.aspect_ratio, self.z_near, self.z_far);
    }

    /// Sets the aspect ratio from viewport dimensions.
    ///
    /// Returns `false` and leaves the camera untouched when either dimension
    /// is zero.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect_ratio = width as f32 / height as f32;
        true
    }

    /// The cached projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// The world-to-view matrix. Falls back to a pure translation when the
    /// camera sits on its target or looks straight along `up`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
            .unwrap_or_else(|| Mat4::from_translation(-self.position))
    }

    /// Packs the camera into the renderer's per-frame view info.
    pub fn view_info(&self) -> ViewInfo {
        ViewInfo {
            view: self.view_matrix(),
            projection: self.projection,
            camera_position: self.position,
        }
    }
}

impl Default for PerspectiveCamera {
    /// 45 degree vertical field of view, 16:9, clipping between 0.1 and 1000.
    fn default() -> Self {
        Self::new(45.0_f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_update_is_exact_and_projection_follows() {
        let mut camera = PerspectiveCamera::default();
        assert!(camera.set_aspect_ratio(1280, 720));
        camera.update_projection_matrix();
        assert_eq!(camera.aspect_ratio, 1280.0 / 720.0);
        let expected = Mat4::perspective_rh_zo(camera.fov_y_radians, 1280.0 / 720.0, 0.1, 1000.0);
        assert_eq!(camera.projection_matrix(), expected);
    }

    #[test]
    fn zero_height_is_ignored() {
        let mut camera = PerspectiveCamera::default();
        let before = camera;
        assert!(!camera.set_aspect_ratio(800, 0));
        assert_eq!(camera, before);
    }

    #[test]
    fn zero_width_is_ignored() {
        let mut camera = PerspectiveCamera::default();
        let before = camera;
        assert!(!camera.set_aspect_ratio(0, 1080));
        camera.update_projection_matrix();
        assert_eq!(camera, before);
        assert!(camera.projection_matrix().cols[0].x.is_finite());
    }

    #[test]
    fn stale_projection_until_updated() {
        let mut camera = PerspectiveCamera::default();
        let before = camera.projection_matrix();
        camera.set_aspect_ratio(1, 1);
        assert_eq!(camera.projection_matrix(), before);
        camera.update_projection_matrix();
        assert_ne!(camera.projection_matrix(), before);
    }
}
