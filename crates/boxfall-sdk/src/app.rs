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

//! The application object: sole owner of the physics world, the scene, the
//! entity table and the camera controls.

use std::time::Duration;

use boxfall_core::math::Vec3;
use boxfall_core::physics::PhysicsProvider;
use boxfall_core::platform::InputEvent;
use boxfall_core::renderer::{RenderError, RenderStats, RenderSystem};
use boxfall_data::{EntityTable, GroundPair, Scene, TrackballControls};
use boxfall_infra::RapierPhysicsWorld;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::DemoConfig;
use crate::provision::{provision_static, spawn_box, spawn_boxes, BoxTemplate};
use crate::sync::{sync_transforms, FIXED_TIME_STEP};
use crate::telemetry::{FrameStats, FrameSummary};

/// The falling-boxes demo.
///
/// Built once at startup; afterwards [`frame`](Self::frame) is called once
/// per redraw and [`resize`](Self::resize) once per surface size change.
pub struct BoxfallApp {
    physics: Box<dyn PhysicsProvider>,
    scene: Scene,
    entities: EntityTable,
    ground: GroundPair,
    template: BoxTemplate,
    controls: TrackballControls,
    stats: FrameStats,
    last_summary: Option<FrameSummary>,
}

impl BoxfallApp {
    /// Builds the demo on a Rapier world, seeding from `config.spawn.seed`
    /// when set and from the OS otherwise.
    pub fn new(config: &DemoConfig, viewport: (u32, u32)) -> Self {
        let mut rng = match config.spawn.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_physics(Box::new(RapierPhysicsWorld::new()), config, viewport, &mut rng)
    }

    /// Builds the demo on the given physics provider, drawing every random
    /// value from `rng`.
    pub fn with_physics<R: Rng + ?Sized>(
        mut physics: Box<dyn PhysicsProvider>,
        config: &DemoConfig,
        viewport: (u32, u32),
        rng: &mut R,
    ) -> Self {
        let mut scene = Scene::default();
        let mut entities = EntityTable::with_capacity(config.spawn.box_count);
        let template = BoxTemplate::from_config(config);

        let ground = provision_static(physics.as_mut(), &mut scene, config, viewport);
        spawn_boxes(
            physics.as_mut(),
            &mut scene,
            &mut entities,
            &config.spawn,
            &template,
            rng,
        );

        Self {
            physics,
            scene,
            entities,
            ground,
            template,
            controls: TrackballControls::new(),
            stats: FrameStats::default(),
            last_summary: None,
        }
    }

    /// Adds one more box of edge `size` at `position`. Returns its row.
    pub fn spawn_box(&mut self, position: Vec3, size: f32) -> usize {
        spawn_box(
            self.physics.as_mut(),
            &mut self.scene,
            &mut self.entities,
            &self.template,
            position,
            size,
        )
    }

    /// Runs one frame: a fixed physics step, the body-to-mesh copy, the
    /// camera controls over `elapsed`, then the render.
    pub fn frame(
        &mut self,
        elapsed: Duration,
        renderer: &mut dyn RenderSystem,
    ) -> Result<RenderStats, RenderError> {
        self.physics.step(FIXED_TIME_STEP);
        sync_transforms(self.physics.as_ref(), &mut self.scene, &self.entities);
        self.controls.update(self.scene.camera_mut(), elapsed);

        let frame = self.scene.extract();
        let result = renderer.render(&frame);

        if let Some(summary) = self.stats.record(elapsed, result.as_ref().ok()) {
            log::info!("--- Frame Stats --- {summary}");
            self.last_summary = Some(summary);
        }
        result
    }

    /// Updates the camera aspect and projection, then resizes the surface.
    ///
    /// A zero dimension leaves the camera untouched.
    pub fn resize(&mut self, width: u32, height: u32, renderer: &mut dyn RenderSystem) {
        let camera = self.scene.camera_mut();
        if camera.set_aspect_ratio(width, height) {
            camera.update_projection_matrix();
            log::debug!("Viewport resized to {width}x{height}");
        }
        renderer.resize(width, height);
    }

    /// Forwards pointer input to the camera controls.
    pub fn handle_input(&mut self, event: &InputEvent) {
        self.controls.handle_input(event);
    }

    pub fn physics(&self) -> &dyn PhysicsProvider {
        self.physics.as_ref()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn entities(&self) -> &EntityTable {
        &self.entities
    }

    pub fn ground(&self) -> &GroundPair {
        &self.ground
    }

    pub fn controls_mut(&mut self) -> &mut TrackballControls {
        &mut self.controls
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// The most recent interval summary, if one has been produced.
    pub fn last_summary(&self) -> Option<&FrameSummary> {
        self.last_summary.as_ref()
    }
}
