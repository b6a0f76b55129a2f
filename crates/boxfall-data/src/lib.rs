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

//! # Boxfall Data
//!
//! The state the demo owns: the retained render [`Scene`], its
//! [`PerspectiveCamera`] and [`TrackballControls`], and the [`EntityTable`]
//! pairing every physics body with its mesh.

#![warn(missing_docs)]

pub mod camera;
pub mod controls;
pub mod entities;
pub mod scene;

pub use camera::PerspectiveCamera;
pub use controls::TrackballControls;
pub use entities::{BoxEntity, EntityTable, GroundPair};
pub use scene::{Mesh, Scene};
