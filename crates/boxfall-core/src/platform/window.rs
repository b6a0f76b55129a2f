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

//! Window and frame-scheduling abstractions the host implements.

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::sync::Arc;

/// Combines the windowing handle traits required by graphics backends so
/// they can be used together behind a trait object.
pub trait WindowHandle: HasWindowHandle + HasDisplayHandle {}

impl<T: HasWindowHandle + HasDisplayHandle> WindowHandle for T {}

/// A shareable handle to the native window, used to create a GPU surface.
pub type BoxfallWindowHandle = Arc<dyn WindowHandle + Send + Sync>;

/// Requests the next frame from the host.
///
/// The synchronization loop calls this once at the end of every frame;
/// the host answers with exactly one new frame callback. This is the
/// "request animation frame" contract: cooperative, one frame at a time.
pub trait FrameScheduler {
    /// Asks the host to schedule another frame.
    fn request_frame(&self);
}

/// A trait that abstracts the behavior of a window.
///
/// Any windowing backend can implement this trait to host the demo.
pub trait BoxfallWindow: HasWindowHandle + HasDisplayHandle + Send + Sync {
    /// Returns the physical dimensions (width, height) of the window's inner area.
    fn inner_size(&self) -> (u32, u32);

    /// Returns the scale factor of the window.
    fn scale_factor(&self) -> f64;

    /// Requests that the window be redrawn.
    fn request_redraw(&self);

    /// Clones an Arc'd, thread-safe handle to the window.
    /// This is necessary for the renderer to create a surface.
    fn clone_handle_arc(&self) -> BoxfallWindowHandle;

    /// Returns the unique identifier for the window.
    fn id(&self) -> u64;
}
