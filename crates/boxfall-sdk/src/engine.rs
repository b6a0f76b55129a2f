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

//! The winit host: opens the window, brings up the renderer, builds the
//! demo, and drives the frame loop from redraw callbacks.

use anyhow::{anyhow, Result};
use boxfall_core::platform::{BoxfallWindow, SystemClock};
use boxfall_core::renderer::{RenderError, RenderSystem};
use boxfall_infra::{translate_winit_input, WgpuRenderSystem, WinitWindow, WinitWindowBuilder};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

use crate::app::BoxfallApp;
use crate::config::DemoConfig;
use crate::frame_loop::FrameLoop;

/// Everything that exists once the window does.
struct Running {
    window: WinitWindow,
    renderer: WgpuRenderSystem,
    app: BoxfallApp,
    frame_loop: FrameLoop<SystemClock, WinitWindow>,
}

/// The internal state of the running engine, managed by the winit event loop.
struct EngineState {
    config: DemoConfig,
    running: Option<Running>,
    startup_error: Option<anyhow::Error>,
}

impl EngineState {
    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let window = WinitWindowBuilder::new()
            .with_title(self.config.window.title.clone())
            .with_dimensions(self.config.window.width, self.config.window.height)
            .build(event_loop)
            .map_err(|e| anyhow!("Failed to create window: {e}"))?;

        let mut renderer = WgpuRenderSystem::new();
        renderer.init(&window)?;

        let app = BoxfallApp::new(&self.config, renderer.surface_size());
        let frame_loop = FrameLoop::new(SystemClock::new(), window.clone());
        frame_loop.start();

        Ok(Running {
            window,
            renderer,
            app,
            frame_loop,
        })
    }
}

impl Drop for EngineState {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            log::info!(
                "Shutting down after {} frames.",
                running.frame_loop.frames()
            );
        }
    }
}

impl ApplicationHandler for EngineState {
    /// Called when the event loop is ready; the window and GPU are created here.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || self.startup_error.is_some() {
            return;
        }

        log::info!("Application resumed. Initializing window and engine systems...");
        match self.start(event_loop) {
            Ok(running) => {
                log::info!(
                    "Boxfall running: {} boxes, window {:#x}",
                    running.app.entities().len(),
                    running.window.id()
                );
                self.running = Some(running);
            }
            Err(e) => {
                log::error!("Startup failed: {e:#}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        if running.window.winit_id() != id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Shutdown requested, exiting event loop...");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                running
                    .app
                    .resize(size.width, size.height, &mut running.renderer);
            }
            WindowEvent::RedrawRequested => {
                match running.frame_loop.tick(&mut running.app, &mut running.renderer) {
                    Ok(stats) => log::trace!("Frame {} rendered.", stats.frame_number),
                    Err(RenderError::FrameSkipped(reason)) => {
                        log::debug!("Frame skipped: {reason}");
                    }
                    Err(e) => log::error!("Rendering error: {e}"),
                }
            }
            other => {
                if let Some(input) = translate_winit_input(&other) {
                    running.app.handle_input(&input);
                }
            }
        }
    }
}

/// The entry point of the demo.
pub struct Engine;

impl Engine {
    /// Opens the window and runs the demo until it is closed.
    ///
    /// Blocks the calling thread. Startup failures (window, adapter, device,
    /// surface) are returned once the event loop has exited.
    pub fn run(config: DemoConfig) -> Result<()> {
        log::info!("Boxfall: Starting...");
        let event_loop = EventLoop::new()?;

        let mut state = EngineState {
            config,
            running: None,
            startup_error: None,
        };
        event_loop.run_app(&mut state)?;

        match state.startup_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
