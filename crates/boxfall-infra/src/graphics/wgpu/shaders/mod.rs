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

//! Built-in WGSL sources.

/// Instanced Lambert shading lit by a single spot light.
///
/// Entry points are `vs_main` and `fs_main`. Group 0 binding 0 holds the
/// frame globals; vertex slot 0 carries position and normal, slot 1 carries
/// per-instance model columns and color.
pub const LAMBERT_WGSL: &str = include_str!("lambert.wgsl");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lambert_entry_points_present() {
        assert!(LAMBERT_WGSL.contains("fn vs_main"));
        assert!(LAMBERT_WGSL.contains("fn fs_main"));
        assert!(LAMBERT_WGSL.contains("@group(0) @binding(0)"));
    }
}
