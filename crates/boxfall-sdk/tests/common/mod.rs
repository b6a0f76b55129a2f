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

//! Headless stand-ins for the GPU and the display.

#![allow(dead_code)]

use std::cell::Cell;

use boxfall_core::platform::FrameScheduler;
use boxfall_core::renderer::{FrameData, RenderError, RenderStats, RenderSystem};
use boxfall_sdk::{BoxfallApp, DemoConfig};
use boxfall_infra::RapierPhysicsWorld;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A `RenderSystem` that keeps the last frame instead of drawing it.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub size: (u32, u32),
    pub frames_rendered: u64,
    pub last_frame: Option<FrameData>,
    /// Returned (once) by the next `render` call instead of succeeding.
    pub fail_next: Option<RenderError>,
}

impl RecordingRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Default::default()
        }
    }
}

impl RenderSystem for RecordingRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.size = (width, height);
        }
    }

    fn surface_size(&self) -> (u32, u32) {
        self.size
    }

    fn render(&mut self, frame: &FrameData) -> Result<RenderStats, RenderError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(RenderStats {
            frame_number: self.frames_rendered,
            draw_calls: 1,
            instances: frame.objects.len() as u32,
            cpu_render_time_ms: 0.0,
        })
    }
}

/// A `FrameScheduler` that counts requests.
#[derive(Debug, Default)]
pub struct CountingScheduler {
    requests: Cell<u32>,
}

impl CountingScheduler {
    pub fn requests(&self) -> u32 {
        self.requests.get()
    }
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&self) {
        self.requests.set(self.requests.get() + 1);
    }
}

/// Default config with `box_count` boxes and a fixed seed.
pub fn config_with(box_count: usize, seed: u64) -> DemoConfig {
    let mut config = DemoConfig::default();
    config.spawn.box_count = box_count;
    config.spawn.seed = Some(seed);
    config
}

/// A Rapier-backed app for a 1280x720 viewport.
pub fn rapier_app(config: &DemoConfig) -> BoxfallApp {
    let mut rng = StdRng::seed_from_u64(config.spawn.seed.unwrap_or(0));
    BoxfallApp::with_physics(
        Box::new(RapierPhysicsWorld::new()),
        config,
        (1280, 720),
        &mut rng,
    )
}
