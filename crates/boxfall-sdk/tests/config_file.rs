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

use std::io::Write;

use boxfall_core::math::Vec3;
use boxfall_sdk::{ConfigError, DemoConfig};

#[test]
fn loads_overrides_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [window]
        title = "Boxfall test"

        [spawn]
        box_count = 42
        seed = 1234

        [physics]
        gravity = {{ x = 0.0, y = -1.62, z = 0.0 }}
        "#
    )
    .unwrap();

    let config = DemoConfig::load(file.path()).unwrap();
    assert_eq!(config.window.title, "Boxfall test");
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.spawn.box_count, 42);
    assert_eq!(config.spawn.seed, Some(1234));
    assert_eq!(config.physics.gravity, Vec3::new(0.0, -1.62, 0.0));
    assert_eq!(config.scene.box_color, 0x2cbe4e);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    match DemoConfig::load(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[camera]\nz_near = 10.0\nz_far = 1.0").unwrap();
    assert!(matches!(
        DemoConfig::load(file.path()),
        Err(ConfigError::Invalid(_))
    ));
}
