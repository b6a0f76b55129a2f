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

//! Mouse-driven trackball camera controls.
//!
//! Left drag orbits the camera around its target, right drag pans both,
//! middle drag and the wheel dolly towards or away from the target. Input
//! is accumulated between frames and drained by [`TrackballControls::update`]
//! with exponential damping, so the camera keeps gliding briefly after the
//! mouse stops.

use std::time::Duration;

use boxfall_core::math::{Quat, Vec2, Vec3};
use boxfall_core::platform::{InputEvent, MouseButton};

use crate::camera::PerspectiveCamera;

/// Below this the pending motion is dropped instead of decayed forever.
const REST_THRESHOLD: f32 = 1e-4;

/// Trackball-style camera controls.
#[derive(Debug, Clone)]
pub struct TrackballControls {
    /// When `false`, input is ignored and [`update`](Self::update) is a no-op.
    pub enabled: bool,
    /// Radians of orbit per pixel of drag.
    pub rotate_speed: f32,
    /// Fraction of the target distance moved per pixel of pan.
    pub pan_speed: f32,
    /// Exponential dolly factor per wheel line.
    pub zoom_speed: f32,
    /// How fast pending motion is consumed, per second. Higher is snappier.
    pub damping_rate: f32,
    /// Closest the camera may get to its target.
    pub min_distance: f32,
    /// Farthest the camera may get from its target.
    pub max_distance: f32,

    rotating: bool,
    panning: bool,
    zooming: bool,
    last_cursor: Option<Vec2>,

    pending_rotate: Vec2,
    pending_pan: Vec2,
    pending_zoom: f32,
}

impl Default for TrackballControls {
    fn default() -> Self {
        Self {
            enabled: true,
            rotate_speed: 0.005,
            pan_speed: 0.0015,
            zoom_speed: 0.1,
            damping_rate: 12.0,
            min_distance: 1.0,
            max_distance: 500.0,
            rotating: false,
            panning: false,
            zooming: false,
            last_cursor: None,
            pending_rotate: Vec2::ZERO,
            pending_pan: Vec2::ZERO,
            pending_zoom: 0.0,
        }
    }
}

impl TrackballControls {
    /// Creates controls with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while some motion is still waiting to be applied.
    pub fn is_moving(&self) -> bool {
        self.pending_rotate.length_squared() > REST_THRESHOLD * REST_THRESHOLD
            || self.pending_pan.length_squared() > REST_THRESHOLD * REST_THRESHOLD
            || self.pending_zoom.abs() > REST_THRESHOLD
    }

    /// Feeds one pointer event into the controls.
    pub fn handle_input(&mut self, event: &InputEvent) {
        if !self.enabled {
            return;
        }

        match *event {
            InputEvent::MouseButtonPressed { button } => self.set_drag(button, true),
            InputEvent::MouseButtonReleased { button } => self.set_drag(button, false),
            InputEvent::MouseMoved { x, y } => {
                let cursor = Vec2::new(x, y);
                if let Some(last) = self.last_cursor {
                    let delta = cursor - last;
                    if self.rotating {
                        self.pending_rotate += delta;
                    }
                    if self.panning {
                        self.pending_pan += delta;
                    }
                    if self.zooming {
                        // Dragging down pulls the camera back.
                        self.pending_zoom -= delta.y * 0.1;
                    }
                }
                self.last_cursor = Some(cursor);
            }
            InputEvent::MouseWheelScrolled { delta_y, .. } => {
                self.pending_zoom += delta_y;
            }
        }
    }

    fn set_drag(&mut self, button: MouseButton, active: bool) {
        match button {
            MouseButton::Left => self.rotating = active,
            MouseButton::Right => self.panning = active,
            MouseButton::Middle => self.zooming = active,
            MouseButton::Other(_) => {}
        }
    }

    /// Applies the share of pending motion that `elapsed` allows to `camera`.
    pub fn update(&mut self, camera: &mut PerspectiveCamera, elapsed: Duration) {
        if !self.enabled {
            return;
        }

        let dt = elapsed.as_secs_f32();
        let k = 1.0 - (-dt * self.damping_rate).exp();
        if k <= 0.0 {
            return;
        }

        let rotate = self.pending_rotate * k;
        let pan = self.pending_pan * k;
        let zoom = self.pending_zoom * k;
        self.pending_rotate -= rotate;
        self.pending_pan -= pan;
        self.pending_zoom -= zoom;

        self.rotate(camera, rotate);
        self.pan(camera, pan);
        self.zoom(camera, zoom);

        if !self.is_moving() {
            self.pending_rotate = Vec2::ZERO;
            self.pending_pan = Vec2::ZERO;
            self.pending_zoom = 0.0;
        }
    }

    fn rotate(&self, camera: &mut PerspectiveCamera, delta: Vec2) {
        if delta.length_squared() == 0.0 {
            return;
        }
        let up = camera.up.normalize();
        let mut offset = camera.position - camera.target;

        let yaw = Quat::from_axis_angle(up, -delta.x * self.rotate_speed);
        offset = yaw * offset;

        let right = (-offset).cross(up).normalize();
        if right != Vec3::ZERO {
            let pitch = Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
            let pitched = pitch * offset;
            // Refuse to flip over the poles.
            if pitched.normalize().dot(up).abs() < 0.999 {
                offset = pitched;
            }
        }

        camera.position = camera.target + offset;
    }

    fn pan(&self, camera: &mut PerspectiveCamera, delta: Vec2) {
        if delta.length_squared() == 0.0 {
            return;
        }
        let offset = camera.position - camera.target;
        let forward = (-offset).normalize();
        let right = forward.cross(camera.up).normalize();
        let up = right.cross(forward);

        let scale = offset.length() * self.pan_speed;
        let shift = (right * -delta.x + up * delta.y) * scale;
        camera.position += shift;
        camera.target += shift;
    }

    fn zoom(&self, camera: &mut PerspectiveCamera, lines: f32) {
        if lines == 0.0 {
            return;
        }
        let offset = camera.position - camera.target;
        let distance = offset.length();
        if distance == 0.0 {
            return;
        }
        let wanted = (distance * (-lines * self.zoom_speed).exp())
            .clamp(self.min_distance, self.max_distance);
        camera.position = camera.target + offset * (wanted / distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::default();
        camera.look_at(Vec3::new(-50.0, 50.0, 50.0), Vec3::ZERO);
        camera
    }

    fn drag(controls: &mut TrackballControls, button: MouseButton, from: Vec2, to: Vec2) {
        controls.handle_input(&InputEvent::MouseMoved { x: from.x, y: from.y });
        controls.handle_input(&InputEvent::MouseButtonPressed { button });
        controls.handle_input(&InputEvent::MouseMoved { x: to.x, y: to.y });
        controls.handle_input(&InputEvent::MouseButtonReleased { button });
    }

    #[test]
    fn idle_controls_leave_camera_alone() {
        let mut controls = TrackballControls::new();
        let mut cam = camera();
        controls.handle_input(&InputEvent::MouseMoved { x: 10.0, y: 10.0 });
        controls.handle_input(&InputEvent::MouseMoved { x: 90.0, y: 40.0 });
        controls.update(&mut cam, Duration::from_millis(16));
        assert_eq!(cam, camera());
        assert!(!controls.is_moving());
    }

    #[test]
    fn orbit_keeps_distance_to_target() {
        let mut controls = TrackballControls::new();
        let mut cam = camera();
        let distance = cam.position.distance(cam.target);
        drag(&mut controls, MouseButton::Left, Vec2::new(0.0, 0.0), Vec2::new(120.0, 30.0));
        assert!(controls.is_moving());
        controls.update(&mut cam, Duration::from_secs(2));

        assert_ne!(cam.position, camera().position);
        assert_eq!(cam.target, Vec3::ZERO);
        approx::assert_relative_eq!(cam.position.distance(cam.target), distance, epsilon = 1e-2);
    }

    #[test]
    fn zero_elapsed_applies_nothing() {
        let mut controls = TrackballControls::new();
        let mut cam = camera();
        drag(&mut controls, MouseButton::Left, Vec2::ZERO, Vec2::new(50.0, 0.0));
        controls.update(&mut cam, Duration::ZERO);
        assert_eq!(cam, camera());
        assert!(controls.is_moving());
    }

    #[test]
    fn wheel_zoom_is_clamped() {
        let mut controls = TrackballControls::new();
        let mut cam = camera();
        controls.handle_input(&InputEvent::MouseWheelScrolled {
            delta_x: 0.0,
            delta_y: 500.0,
        });
        controls.update(&mut cam, Duration::from_secs(5));
        approx::assert_relative_eq!(
            cam.position.distance(cam.target),
            controls.min_distance,
            epsilon = 1e-3
        );
    }

    #[test]
    fn pan_moves_target_with_camera() {
        let mut controls = TrackballControls::new();
        let mut cam = camera();
        let offset = cam.position - cam.target;
        drag(&mut controls, MouseButton::Right, Vec2::ZERO, Vec2::new(40.0, 0.0));
        controls.update(&mut cam, Duration::from_secs(2));
        assert_ne!(cam.target, Vec3::ZERO);
        let after = cam.position - cam.target;
        approx::assert_relative_eq!(after.x, offset.x, epsilon = 1e-3);
        approx::assert_relative_eq!(after.y, offset.y, epsilon = 1e-3);
        approx::assert_relative_eq!(after.z, offset.z, epsilon = 1e-3);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let mut controls = TrackballControls::new();
        controls.enabled = false;
        controls.handle_input(&InputEvent::MouseWheelScrolled {
            delta_x: 0.0,
            delta_y: 3.0,
        });
        assert!(!controls.is_moving());
    }
}
