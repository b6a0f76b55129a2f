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

//! # Rendering Abstractions
//!
//! The render side is split in two contracts:
//!
//! - [`RenderScene`]: the retained scene the application mutates (meshes,
//!   their transforms).
//! - [`RenderSystem`]: the backend that draws an extracted [`FrameData`]
//!   snapshot and owns the output surface.

pub mod error;
pub mod scene;

pub use self::error::RenderError;
pub use self::scene::{
    Geometry, LambertMaterial, MeshDesc, MeshHandle, RenderScene, SpotLight,
};

use crate::math::{LinearRgba, Mat4, Vec3};

/// Camera matrices for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewInfo {
    /// World-to-view transform.
    pub view: Mat4,
    /// View-to-clip transform.
    pub projection: Mat4,
    /// Camera position in world space.
    pub camera_position: Vec3,
}

impl ViewInfo {
    /// Returns `projection * view`.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

impl Default for ViewInfo {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            camera_position: Vec3::ZERO,
        }
    }
}

/// One drawable instance, fully resolved for the GPU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderObject {
    /// Which primitive to draw. Its size is folded into `model`.
    pub geometry: Geometry,
    /// Model matrix (translation * rotation * geometry scale).
    pub model: Mat4,
    /// Diffuse color.
    pub color: LinearRgba,
}

/// Everything a [`RenderSystem`] needs to draw one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameData {
    /// Camera matrices.
    pub view: ViewInfo,
    /// Visible meshes.
    pub objects: Vec<RenderObject>,
    /// The scene's light, if any.
    pub light: Option<SpotLight>,
    /// Color the surface is cleared to.
    pub clear_color: LinearRgba,
}

/// Statistics about a single rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    /// The number of the frame that was rendered.
    pub frame_number: u64,
    /// Number of draw calls issued.
    pub draw_calls: u32,
    /// Number of instances submitted.
    pub instances: u32,
    /// CPU time spent encoding and submitting, in milliseconds.
    pub cpu_render_time_ms: f32,
}

/// The backend that turns a [`FrameData`] into pixels on the output surface.
pub trait RenderSystem {
    /// Resizes the output surface.
    ///
    /// Zero-sized requests (a minimized window) are ignored.
    fn resize(&mut self, width: u32, height: u32);

    /// Returns the current output surface size.
    fn surface_size(&self) -> (u32, u32);

    /// Draws one frame.
    fn render(&mut self, frame: &FrameData) -> Result<RenderStats, RenderError>;
}
