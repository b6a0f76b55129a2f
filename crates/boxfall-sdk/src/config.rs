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

//! Demo configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives
//! the stock scene: a thousand boxes dropped from (0, 50, 0) onto a
//! 200×200 ground.

use std::path::{Path, PathBuf};

use boxfall_core::math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`DemoConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Window title and initial inner size, in logical pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Boxfall".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// How many boxes to drop, and from where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub box_count: usize,
    pub drop_point: Vec3,
    /// Edge length is drawn from `[min_size, max_size)`.
    pub min_size: f32,
    pub max_size: f32,
    /// Extra height above the drop point, drawn from `[0, height_jitter)`.
    pub height_jitter: f32,
    /// Spread along Z, centred on the drop point.
    pub depth_spread: f32,
    /// Fixes the random sequence; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            box_count: 1000,
            drop_point: Vec3::new(0.0, 50.0, 0.0),
            min_size: 1.0,
            max_size: 3.0,
            height_jitter: 6.0,
            depth_spread: 100.0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: Vec3,
    pub friction: f32,
    pub restitution: f32,
    pub box_mass: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.82, 0.0),
            friction: 0.3,
            restitution: 0.0,
            box_mass: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 1000.0,
            position: Vec3::new(-50.0, 50.0, 50.0),
            target: Vec3::ZERO,
        }
    }
}

/// Static scene dressing. Colors are sRGB hex, as in `0x2cbe4e`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub ground_size: f32,
    pub ground_color: u32,
    pub box_color: u32,
    pub clear_color: u32,
    pub light_position: Vec3,
    pub light_target: Vec3,
    pub light_color: u32,
    pub light_intensity: f32,
    pub light_angle_degrees: f32,
    pub light_penumbra: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ground_size: 200.0,
            ground_color: 0xaaaaaa,
            box_color: 0x2cbe4e,
            clear_color: 0x000000,
            light_position: Vec3::new(-20.0, 50.0, 20.0),
            light_target: Vec3::ZERO,
            light_color: 0xffffff,
            light_intensity: 1.0,
            light_angle_degrees: 60.0,
            light_penumbra: 0.0,
        }
    }
}

/// Top-level demo configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub spawn: SpawnConfig,
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
}

impl DemoConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: DemoConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the TOML file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::info!("Loaded configuration from '{}'", path.display());
        Ok(config)
    }

    /// Checks the values the demo cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window size must be non-zero");
        }
        let spawn = &self.spawn;
        if !(spawn.min_size > 0.0) {
            return invalid("spawn.min_size must be positive");
        }
        if spawn.max_size < spawn.min_size {
            return invalid("spawn.max_size must not be below spawn.min_size");
        }
        if spawn.height_jitter < 0.0 || spawn.depth_spread < 0.0 {
            return invalid("spawn jitter and spread must not be negative");
        }
        if !(self.physics.box_mass > 0.0) {
            return invalid("physics.box_mass must be positive");
        }
        if self.physics.friction < 0.0 || self.physics.restitution < 0.0 {
            return invalid("friction and restitution must not be negative");
        }
        let camera = &self.camera;
        if !(camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0) {
            return invalid("camera.fov_y_degrees must lie in (0, 180)");
        }
        if !(camera.z_near > 0.0 && camera.z_far > camera.z_near) {
            return invalid("camera clip planes must satisfy 0 < z_near < z_far");
        }
        if !(self.scene.ground_size > 0.0) {
            return invalid("scene.ground_size must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = DemoConfig::from_toml_str("").unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.spawn.box_count, 1000);
        assert_eq!(config.physics.gravity, Vec3::new(0.0, -9.82, 0.0));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = DemoConfig::from_toml_str(
            r#"
            [spawn]
            box_count = 10
            seed = 7
            drop_point = { x = 1.0, y = 20.0, z = -3.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.spawn.box_count, 10);
        assert_eq!(config.spawn.seed, Some(7));
        assert_eq!(config.spawn.drop_point, Vec3::new(1.0, 20.0, -3.0));
        assert_eq!(config.spawn.max_size, 3.0);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_rejects_inverted_size_range() {
        let err = DemoConfig::from_toml_str("[spawn]\nmin_size = 3.0\nmax_size = 1.0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = DemoConfig::from_toml_str("[spawn\nbox_count = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
