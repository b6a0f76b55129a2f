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

//! Defines the error type for the rendering subsystem.

use std::fmt;

/// Errors a [`RenderSystem`](super::RenderSystem) can report.
#[derive(Debug)]
pub enum RenderError {
    /// The backend could not be brought up (adapter, device or surface).
    InitializationFailed(String),
    /// `render` was called before the backend was initialized.
    NotInitialized,
    /// The surface was lost or outdated; it has been reconfigured and this
    /// frame was dropped.
    FrameSkipped(String),
    /// The surface could not provide a texture to draw into.
    SurfaceAcquireFailed(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InitializationFailed(msg) => {
                write!(f, "Renderer initialization failed: {msg}")
            }
            RenderError::NotInitialized => write!(f, "Renderer is not initialized"),
            RenderError::FrameSkipped(reason) => write!(f, "Frame skipped: {reason}"),
            RenderError::SurfaceAcquireFailed(msg) => {
                write!(f, "Failed to acquire surface texture: {msg}")
            }
        }
    }
}

impl std::error::Error for RenderError {}
