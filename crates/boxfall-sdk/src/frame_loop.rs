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

//! The cooperative frame loop: one frame per host callback, and each frame
//! asks for the next.

use boxfall_core::platform::{Clock, FrameScheduler};
use boxfall_core::renderer::{RenderError, RenderStats, RenderSystem};

use crate::app::BoxfallApp;

/// Drives a [`BoxfallApp`] from a [`Clock`] and a [`FrameScheduler`].
pub struct FrameLoop<C: Clock, S: FrameScheduler> {
    clock: C,
    scheduler: S,
    frames: u64,
}

impl<C: Clock, S: FrameScheduler> FrameLoop<C, S> {
    pub fn new(clock: C, scheduler: S) -> Self {
        Self {
            clock,
            scheduler,
            frames: 0,
        }
    }

    /// Requests the first frame.
    pub fn start(&self) {
        log::debug!("Frame loop started");
        self.scheduler.request_frame();
    }

    /// Runs one frame with the time elapsed since the previous tick, then
    /// requests the next one.
    ///
    /// The next frame is requested even when rendering fails, so a skipped
    /// frame never stalls the loop.
    pub fn tick(
        &mut self,
        app: &mut BoxfallApp,
        renderer: &mut dyn RenderSystem,
    ) -> Result<RenderStats, RenderError> {
        let elapsed = self.clock.delta();
        let result = app.frame(elapsed, renderer);
        self.frames += 1;
        self.scheduler.request_frame();
        result
    }

    /// Frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
