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

//! Frame clocks.
//!
//! The frame loop asks its clock how much wall-clock time passed since the
//! previous frame. That value only feeds the camera controls and the frame
//! statistics; the physics step is fixed and never reads it.

use std::time::{Duration, Instant};

/// A source of elapsed time between frames.
pub trait Clock {
    /// Returns the time elapsed since the previous call.
    ///
    /// Wall-clock implementations return [`Duration::ZERO`] on the first call.
    fn delta(&mut self) -> Duration;
}

/// A [`Clock`] backed by the monotonic system clock.
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    last: Option<Instant>,
}

impl SystemClock {
    /// Creates a clock that starts measuring on its first `delta` call.
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl Clock for SystemClock {
    fn delta(&mut self) -> Duration {
        let now = Instant::now();
        let delta = self
            .last
            .map(|last| now.duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        delta
    }
}

/// A [`Clock`] that replays a scripted sequence of frame intervals.
///
/// Once the script runs out, the last interval repeats. An empty script
/// always yields [`Duration::ZERO`].
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    intervals: Vec<Duration>,
    cursor: usize,
}

impl ManualClock {
    /// Creates a clock that yields `intervals` in order.
    pub fn new(intervals: Vec<Duration>) -> Self {
        Self {
            intervals,
            cursor: 0,
        }
    }

    /// Creates a clock that always yields `interval`.
    pub fn fixed(interval: Duration) -> Self {
        Self::new(vec![interval])
    }
}

impl Clock for ManualClock {
    fn delta(&mut self) -> Duration {
        let Some(last) = self.intervals.len().checked_sub(1) else {
            return Duration::ZERO;
        };
        let delta = self.intervals[self.cursor.min(last)];
        self.cursor += 1;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_first_delta_is_zero() {
        let mut clock = SystemClock::new();
        assert_eq!(clock.delta(), Duration::ZERO);
    }

    #[test]
    fn system_clock_measures_sleep() {
        let mut clock = SystemClock::new();
        clock.delta();
        std::thread::sleep(Duration::from_millis(5));
        assert!(clock.delta() >= Duration::from_millis(5));
    }

    #[test]
    fn manual_clock_replays_then_repeats_last() {
        let mut clock = ManualClock::new(vec![
            Duration::from_millis(16),
            Duration::from_millis(40),
        ]);
        assert_eq!(clock.delta(), Duration::from_millis(16));
        assert_eq!(clock.delta(), Duration::from_millis(40));
        assert_eq!(clock.delta(), Duration::from_millis(40));
    }

    #[test]
    fn manual_clock_empty_is_zero() {
        let mut clock = ManualClock::default();
        assert_eq!(clock.delta(), Duration::ZERO);
    }
}
