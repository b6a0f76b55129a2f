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

// Falling boxes: a thousand cubes dropped onto a ground plane.
// Reads `boxfall.toml` from the working directory when present.

use std::path::Path;

use anyhow::{Context, Result};
use boxfall_sdk::{DemoConfig, Engine};

const CONFIG_FILE: &str = "boxfall.toml";

fn load_config() -> Result<DemoConfig> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        DemoConfig::load(path).with_context(|| format!("Failed to load '{CONFIG_FILE}'"))
    } else {
        log::info!("No '{CONFIG_FILE}' found. Using default configuration.");
        Ok(DemoConfig::default())
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Warn)
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .init();

    let config = load_config()?;
    Engine::run(config)?;
    Ok(())
}
