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

//! The in-memory render scene.

use boxfall_core::math::{LinearRgba, Mat4, Quat, Vec3};
use boxfall_core::renderer::{
    FrameData, Geometry, LambertMaterial, MeshDesc, MeshHandle, RenderObject, RenderScene,
    SpotLight,
};

use crate::camera::PerspectiveCamera;

/// A mesh stored in the [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    /// The shape.
    pub geometry: Geometry,
    /// The surface.
    pub material: LambertMaterial,
    /// Position in world space.
    pub position: Vec3,
    /// Rotation in world space.
    pub rotation: Quat,
}

impl Mesh {
    /// Model matrix including the geometry's own scale.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.geometry.scale(), self.rotation, self.position)
    }
}

/// A retained scene: meshes, one camera, at most one light.
///
/// Mesh handles are indices into an append-only list.
#[derive(Debug, Clone)]
pub struct Scene {
    meshes: Vec<Mesh>,
    camera: PerspectiveCamera,
    light: Option<SpotLight>,
    clear_color: LinearRgba,
}

impl Scene {
    /// Creates an empty scene viewed through `camera`, cleared to black.
    pub fn new(camera: PerspectiveCamera) -> Self {
        Self {
            meshes: Vec::new(),
            camera,
            light: None,
            clear_color: LinearRgba::BLACK,
        }
    }

    /// The active camera.
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Mutable access to the active camera.
    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    /// Sets the scene's light.
    pub fn set_light(&mut self, light: SpotLight) {
        self.light = Some(light);
    }

    /// The scene's light, if any.
    pub fn light(&self) -> Option<&SpotLight> {
        self.light.as_ref()
    }

    /// Sets the background color.
    pub fn set_clear_color(&mut self, color: LinearRgba) {
        self.clear_color = color;
    }

    /// Looks up a mesh.
    pub fn mesh(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle.0 as usize)
    }

    /// Iterates over all meshes in insertion order.
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.meshes.iter()
    }

    /// Snapshots the scene for the renderer.
    pub fn extract(&self) -> FrameData {
        let objects = self
            .meshes
            .iter()
            .map(|mesh| RenderObject {
                geometry: mesh.geometry,
                model: mesh.model_matrix(),
                color: mesh.material.color,
            })
            .collect();

        FrameData {
            view: self.camera.view_info(),
            objects,
            light: self.light,
            clear_color: self.clear_color,
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(PerspectiveCamera::default())
    }
}

impl RenderScene for Scene {
    fn add_mesh(&mut self, desc: MeshDesc) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len() as u32);
        self.meshes.push(Mesh {
            geometry: desc.geometry,
            material: desc.material,
            position: desc.position,
            rotation: desc.rotation,
        });
        handle
    }

    fn set_mesh_transform(&mut self, handle: MeshHandle, position: Vec3, rotation: Quat) {
        if let Some(mesh) = self.meshes.get_mut(handle.0 as usize) {
            mesh.position = position;
            mesh.rotation = rotation;
        } else {
            log::warn!("set_mesh_transform: unknown mesh {handle:?}");
        }
    }

    fn mesh_transform(&self, handle: MeshHandle) -> Option<(Vec3, Quat)> {
        self.mesh(handle).map(|m| (m.position, m.rotation))
    }

    fn mesh_geometry(&self, handle: MeshHandle) -> Option<Geometry> {
        self.mesh(handle).map(|m| m.geometry)
    }

    fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}
