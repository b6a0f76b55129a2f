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

mod common;

use std::time::Duration;

use boxfall_core::math::Vec3;
use boxfall_core::platform::{InputEvent, ManualClock};
use boxfall_core::renderer::{Geometry, RenderError, RenderScene, RenderSystem};
use boxfall_sdk::{BoxfallApp, FrameLoop};
use common::{config_with, rapier_app, CountingScheduler, RecordingRenderer};

fn assert_meshes_follow_bodies(app: &BoxfallApp) {
    for row in app.entities() {
        let body = app.physics().body_transform(row.body);
        let mesh = app.scene().mesh_transform(row.mesh);
        assert_eq!(mesh, body, "row with mesh {:?} drifted", row.mesh);
    }
}

#[test]
fn meshes_mirror_bodies_after_every_frame() {
    let mut app = rapier_app(&config_with(100, 21));
    let mut renderer = RecordingRenderer::new(1280, 720);
    let mut frames = FrameLoop::new(
        ManualClock::fixed(Duration::from_millis(16)),
        CountingScheduler::default(),
    );

    for _ in 0..90 {
        frames.tick(&mut app, &mut renderer).unwrap();
        assert_meshes_follow_bodies(&app);
    }
    assert_eq!(renderer.frames_rendered, 90);
}

#[test]
fn one_step_drop_end_to_end() {
    let mut app = rapier_app(&config_with(0, 0));
    let row = app.spawn_box(Vec3::new(0.0, 50.0, 0.0), 2.0);
    let entity = *app.entities().get(row).unwrap();
    let mut renderer = RecordingRenderer::new(800, 600);

    app.frame(Duration::ZERO, &mut renderer).unwrap();

    let (body_pos, body_rot) = app.physics().body_transform(entity.body).unwrap();
    assert!(body_pos.y < 50.0);
    let (mesh_pos, mesh_rot) = app.scene().mesh_transform(entity.mesh).unwrap();
    assert_eq!(mesh_pos.y, body_pos.y);
    assert_eq!(mesh_pos, body_pos);
    assert_eq!(mesh_rot, body_rot);

    // The renderer saw the synced transform, scaled to the box size.
    let frame = renderer.last_frame.as_ref().unwrap();
    let drawn = frame
        .objects
        .iter()
        .find(|o| matches!(o.geometry, Geometry::Cube { .. }))
        .expect("box instance");
    assert_eq!(drawn.model.cols[3].y, body_pos.y);
    assert_eq!(drawn.model.cols[0].x, 2.0);
}

#[test]
fn physics_step_ignores_frame_interval() {
    let config = config_with(30, 8);
    let mut fast = rapier_app(&config);
    let mut slow = rapier_app(&config);
    let mut renderer = RecordingRenderer::new(1280, 720);

    let mut fast_loop = FrameLoop::new(
        ManualClock::fixed(Duration::from_millis(1)),
        CountingScheduler::default(),
    );
    let mut slow_loop = FrameLoop::new(
        ManualClock::new(vec![
            Duration::from_millis(250),
            Duration::from_millis(5),
            Duration::from_millis(90),
        ]),
        CountingScheduler::default(),
    );

    for _ in 0..45 {
        fast_loop.tick(&mut fast, &mut renderer).unwrap();
        slow_loop.tick(&mut slow, &mut renderer).unwrap();
    }

    for (a, b) in fast.entities().iter().zip(slow.entities()) {
        assert_eq!(
            fast.physics().body_transform(a.body),
            slow.physics().body_transform(b.body)
        );
    }
}

#[test]
fn free_fall_advances_one_sixtieth_per_frame() {
    let mut app = rapier_app(&config_with(0, 0));
    let row = app.spawn_box(Vec3::new(0.0, 500.0, 0.0), 1.0);
    let body = app.entities().get(row).unwrap().body;
    let mut renderer = RecordingRenderer::new(1280, 720);
    let mut frames = FrameLoop::new(
        ManualClock::fixed(Duration::from_millis(250)),
        CountingScheduler::default(),
    );

    for _ in 0..60 {
        frames.tick(&mut app, &mut renderer).unwrap();
    }

    // One simulated second, not fifteen.
    let (position, _) = app.physics().body_transform(body).unwrap();
    let fallen = 500.0 - position.y;
    assert!(fallen > 4.5 && fallen < 5.5, "fell {fallen}");
}

#[test]
fn every_tick_schedules_exactly_one_more_frame() {
    let mut app = rapier_app(&config_with(5, 2));
    let mut renderer = RecordingRenderer::new(1280, 720);
    let mut frames = FrameLoop::new(ManualClock::default(), CountingScheduler::default());

    frames.start();
    assert_eq!(frames.scheduler().requests(), 1);

    for i in 1..=10 {
        frames.tick(&mut app, &mut renderer).unwrap();
        assert_eq!(frames.scheduler().requests(), 1 + i);
    }
    assert_eq!(frames.frames(), 10);
}

#[test]
fn failed_render_still_schedules_and_syncs() {
    let mut app = rapier_app(&config_with(5, 2));
    let mut renderer = RecordingRenderer::new(1280, 720);
    renderer.fail_next = Some(RenderError::FrameSkipped("Outdated".to_string()));
    let mut frames = FrameLoop::new(ManualClock::default(), CountingScheduler::default());

    let result = frames.tick(&mut app, &mut renderer);
    assert!(matches!(result, Err(RenderError::FrameSkipped(_))));
    assert_eq!(frames.scheduler().requests(), 1);
    assert_meshes_follow_bodies(&app);

    frames.tick(&mut app, &mut renderer).unwrap();
    assert_eq!(renderer.frames_rendered, 1);
}

#[test]
fn resize_sets_exact_aspect_and_surface() {
    let mut app = rapier_app(&config_with(0, 0));
    let mut renderer = RecordingRenderer::new(1280, 720);

    app.resize(1920, 1080, &mut renderer);
    assert_eq!(app.scene().camera().aspect_ratio, 1920.0 / 1080.0);
    assert_eq!(renderer.surface_size(), (1920, 1080));

    let projection = app.scene().camera().projection_matrix();
    app.resize(1920, 1080, &mut renderer);
    assert_eq!(app.scene().camera().projection_matrix(), projection);

    // Minimized: nothing changes.
    app.resize(0, 1080, &mut renderer);
    assert_eq!(app.scene().camera().aspect_ratio, 1920.0 / 1080.0);
    assert_eq!(renderer.surface_size(), (1920, 1080));
}

#[test]
fn frame_stats_summarize_each_second() {
    let mut app = rapier_app(&config_with(3, 4));
    let mut renderer = RecordingRenderer::new(1280, 720);
    let mut frames = FrameLoop::new(
        ManualClock::fixed(Duration::from_millis(100)),
        CountingScheduler::default(),
    );

    for _ in 0..9 {
        frames.tick(&mut app, &mut renderer).unwrap();
    }
    assert!(app.last_summary().is_none());

    frames.tick(&mut app, &mut renderer).unwrap();
    let summary = app.last_summary().unwrap();
    assert_eq!(summary.frames, 10);
    assert_eq!(summary.total_frames, app.stats().total_frames());
    assert_eq!(summary.instances, 4);
    approx::assert_relative_eq!(summary.fps, 10.0, epsilon = 1e-3);
}

#[test]
fn pointer_input_steers_the_camera_unless_disabled() {
    let mut app = rapier_app(&config_with(0, 0));
    let mut renderer = RecordingRenderer::new(1280, 720);
    let start = *app.scene().camera();
    let wheel = InputEvent::MouseWheelScrolled {
        delta_x: 0.0,
        delta_y: 2.0,
    };

    app.controls_mut().enabled = false;
    app.handle_input(&wheel);
    app.frame(Duration::from_millis(500), &mut renderer).unwrap();
    assert_eq!(app.scene().camera().position, start.position);

    app.controls_mut().enabled = true;
    app.handle_input(&wheel);
    app.frame(Duration::from_millis(500), &mut renderer).unwrap();
    let camera = app.scene().camera();
    assert!(camera.position.distance(camera.target) < start.position.distance(start.target));
    assert_eq!(camera.target, start.target);
}
