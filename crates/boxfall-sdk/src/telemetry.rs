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

//! Frame statistics, summarized once per interval.

use std::time::Duration;

use boxfall_core::renderer::RenderStats;

/// Aggregated figures for one reporting interval.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameSummary {
    /// Frames per second over the interval.
    pub fps: f32,
    /// Mean frame interval, in milliseconds.
    pub avg_frame_ms: f32,
    /// Longest frame interval, in milliseconds.
    pub max_frame_ms: f32,
    /// Frames counted in the interval.
    pub frames: u32,
    /// Frames whose render failed or was skipped.
    pub skipped: u32,
    /// Frames since startup.
    pub total_frames: u64,
    /// Instances in the last presented frame.
    pub instances: u32,
    /// Draw calls in the last presented frame.
    pub draw_calls: u32,
}

impl std::fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1} FPS | frame {:.2} ms avg, {:.2} ms max | {} instances in {} draw calls | {} skipped",
            self.fps,
            self.avg_frame_ms,
            self.max_frame_ms,
            self.instances,
            self.draw_calls,
            self.skipped
        )
    }
}

/// Collects per-frame timings and emits a [`FrameSummary`] every `interval`
/// of accumulated frame time.
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: Duration,
    window_elapsed: Duration,
    window_max: Duration,
    window_frames: u32,
    window_skipped: u32,
    total_frames: u64,
    last_render: RenderStats,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl FrameStats {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            window_elapsed: Duration::ZERO,
            window_max: Duration::ZERO,
            window_frames: 0,
            window_skipped: 0,
            total_frames: 0,
            last_render: RenderStats::default(),
        }
    }

    /// Frames recorded since startup.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Records one frame. `render` is `None` when the frame was not presented.
    ///
    /// Returns a summary when the interval has elapsed, then starts a new one.
    pub fn record(
        &mut self,
        elapsed: Duration,
        render: Option<&RenderStats>,
    ) -> Option<FrameSummary> {
        self.total_frames += 1;
        self.window_frames += 1;
        self.window_elapsed += elapsed;
        self.window_max = self.window_max.max(elapsed);
        match render {
            Some(stats) => self.last_render = *stats,
            None => self.window_skipped += 1,
        }

        if self.window_elapsed < self.interval {
            return None;
        }

        let secs = self.window_elapsed.as_secs_f32();
        let summary = FrameSummary {
            fps: self.window_frames as f32 / secs,
            avg_frame_ms: secs * 1000.0 / self.window_frames as f32,
            max_frame_ms: self.window_max.as_secs_f32() * 1000.0,
            frames: self.window_frames,
            skipped: self.window_skipped,
            total_frames: self.total_frames,
            instances: self.last_render.instances,
            draw_calls: self.last_render.draw_calls,
        };
        self.window_elapsed = Duration::ZERO;
        self.window_max = Duration::ZERO;
        self.window_frames = 0;
        self.window_skipped = 0;
        Some(summary)
    }
}
