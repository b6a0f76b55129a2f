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

//! # Boxfall SDK
//!
//! The falling-boxes demo put together: configuration, scene provisioning,
//! the body-to-mesh synchronization loop and the winit [`Engine`] that
//! hosts it.

pub mod app;
pub mod config;
pub mod engine;
pub mod frame_loop;
pub mod provision;
pub mod sync;
pub mod telemetry;

pub use app::BoxfallApp;
pub use config::{ConfigError, DemoConfig};
pub use engine::Engine;
pub use frame_loop::FrameLoop;
pub use sync::FIXED_TIME_STEP;

pub mod prelude {
    pub use crate::app::BoxfallApp;
    pub use crate::config::{ConfigError, DemoConfig};
    pub use crate::engine::Engine;
    pub use crate::frame_loop::FrameLoop;
    pub use crate::provision::{provision_static, spawn_box, spawn_boxes, BoxTemplate};
    pub use crate::sync::{sync_transforms, FIXED_TIME_STEP};
    pub use boxfall_core::math::{LinearRgba, Quat, Vec3};
    pub use boxfall_core::physics::PhysicsProvider;
    pub use boxfall_core::platform::{Clock, FrameScheduler, ManualClock, SystemClock};
    pub use boxfall_core::renderer::{
        FrameData, RenderError, RenderScene, RenderStats, RenderSystem,
    };
    pub use boxfall_data::{EntityTable, Scene};
}
