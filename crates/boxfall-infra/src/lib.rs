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

//! # Boxfall Infra
//!
//! Concrete backends for the contracts in `boxfall-core`: Rapier physics,
//! a WGPU renderer and a winit window. Each backend sits behind a cargo
//! feature of the same area name.

#[cfg(feature = "graphics")]
pub mod graphics;
#[cfg(feature = "physics")]
pub mod physics;
#[cfg(feature = "platform")]
pub mod platform;

#[cfg(feature = "graphics")]
pub use graphics::wgpu::WgpuRenderSystem;
#[cfg(feature = "physics")]
pub use physics::rapier::RapierPhysicsWorld;
#[cfg(feature = "platform")]
pub use platform::input::translate_winit_input;
#[cfg(feature = "platform")]
pub use platform::window::{WinitWindow, WinitWindowBuilder};
