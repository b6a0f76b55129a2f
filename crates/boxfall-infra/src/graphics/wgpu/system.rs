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

//! The concrete, WGPU-based implementation of the `RenderSystem` trait.

use std::fmt;
use std::time::Instant;

use boxfall_core::math::LinearRgba;
use boxfall_core::platform::BoxfallWindow;
use boxfall_core::renderer::{
    FrameData, Geometry, RenderError, RenderObject, RenderStats, RenderSystem, SpotLight,
};
use wgpu::util::DeviceExt;

use super::context::{WgpuGraphicsContext, DEPTH_FORMAT};
use super::primitives::{unit_cube, unit_plane, MeshData, Vertex};
use super::shaders::LAMBERT_WGSL;

/// Light left on every surface regardless of the spot light.
const AMBIENT: [f32; 3] = [0.06, 0.06, 0.06];

/// Frame-wide uniform block, mirrored by `Globals` in the shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobalsUniform {
    view_proj: [[f32; 4]; 4],
    light_position: [f32; 4],
    light_direction: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
}

impl GlobalsUniform {
    fn new(frame: &FrameData) -> Self {
        let view_proj = frame.view.view_projection().to_cols_array_2d();
        match frame.light {
            Some(light) => Self::lit(view_proj, &light),
            None => Self {
                view_proj,
                light_position: [0.0; 4],
                light_direction: [0.0, -1.0, 0.0, 1.0],
                light_color: [0.0; 4],
                ambient: [1.0, 1.0, 1.0, 0.0],
            },
        }
    }

    fn lit(view_proj: [[f32; 4]; 4], light: &SpotLight) -> Self {
        let p = light.position;
        let d = light.direction();
        let c = light.color;
        Self {
            view_proj,
            light_position: [p.x, p.y, p.z, light.intensity],
            light_direction: [d.x, d.y, d.z, light.cos_outer()],
            light_color: [c.r, c.g, c.b, light.cos_inner()],
            ambient: [AMBIENT[0], AMBIENT[1], AMBIENT[2], 1.0],
        }
    }
}

/// Per-instance data: the model matrix columns and the diffuse color.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl InstanceRaw {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4,
        6 => Float32x4,
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    fn from_object(object: &RenderObject) -> Self {
        Self {
            model: object.model.to_cols_array_2d(),
            color: object.color.to_array(),
        }
    }
}

/// A primitive uploaded to the GPU.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }
}

/// Everything that exists only once the device does.
struct GpuState {
    context: WgpuGraphicsContext,
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    depth_view: wgpu::TextureView,
    cube: GpuMesh,
    plane: GpuMesh,
}

impl GpuState {
    fn new(context: WgpuGraphicsContext) -> Self {
        let device = &context.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Lambert Shader"),
            source: wgpu::ShaderSource::Wgsl(LAMBERT_WGSL.into()),
        });

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals Uniform Buffer"),
            size: std::mem::size_of::<GlobalsUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals Bind Group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Lambert Pipeline Layout"),
            bind_group_layouts: &[&globals_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Lambert Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout(), InstanceRaw::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                // The ground plane is seen from both sides.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let instance_capacity = 1024;
        let instance_buffer = Self::create_instance_buffer(device, instance_capacity);
        let cube = GpuMesh::upload(device, "Cube", &unit_cube());
        let plane = GpuMesh::upload(device, "Plane", &unit_plane());
        let depth_view = context.create_depth_view();

        log::info!("Lambert pipeline ready ({:?})", context.format());

        Self {
            context,
            pipeline,
            globals_buffer,
            globals_bind_group,
            instance_buffer,
            instance_capacity,
            depth_view,
            cube,
            plane,
        }
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (capacity * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Grows the instance buffer to hold at least `needed` instances.
    fn ensure_instance_capacity(&mut self, needed: usize) {
        if needed <= self.instance_capacity {
            return;
        }
        let capacity = needed.next_power_of_two();
        log::debug!(
            "Growing instance buffer from {} to {capacity} instances",
            self.instance_capacity
        );
        self.instance_buffer = Self::create_instance_buffer(&self.context.device, capacity);
        self.instance_capacity = capacity;
    }
}

/// Cubes first, planes second; returns the instance data and the split index.
fn batch_instances(objects: &[RenderObject]) -> (Vec<InstanceRaw>, usize) {
    let mut instances = Vec::with_capacity(objects.len());
    instances.extend(
        objects
            .iter()
            .filter(|o| matches!(o.geometry, Geometry::Cube { .. }))
            .map(InstanceRaw::from_object),
    );
    let cube_count = instances.len();
    instances.extend(
        objects
            .iter()
            .filter(|o| matches!(o.geometry, Geometry::Plane { .. }))
            .map(InstanceRaw::from_object),
    );
    (instances, cube_count)
}

fn to_wgpu_color(color: LinearRgba) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

/// The concrete, WGPU-based implementation of the [`RenderSystem`] trait.
///
/// Created empty; [`init`](Self::init) brings up the device against a
/// window. Every frame is drawn in a single pass: one instanced draw call
/// per primitive kind, depth-tested, lit by the scene's spot light.
pub struct WgpuRenderSystem {
    state: Option<GpuState>,
    frame_count: u64,
    last_frame_stats: RenderStats,
}

impl fmt::Debug for WgpuRenderSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WgpuRenderSystem")
            .field("initialized", &self.state.is_some())
            .field(
                "adapter",
                &self.state.as_ref().map(|s| s.context.adapter_name.as_str()),
            )
            .field("frame_count", &self.frame_count)
            .finish()
    }
}

impl Default for WgpuRenderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl WgpuRenderSystem {
    /// Creates a new, uninitialized `WgpuRenderSystem`.
    pub fn new() -> Self {
        Self {
            state: None,
            frame_count: 0,
            last_frame_stats: RenderStats::default(),
        }
    }

    /// Brings up the GPU device for `window`, blocking until it is ready.
    pub fn init(&mut self, window: &dyn BoxfallWindow) -> Result<(), RenderError> {
        if self.state.is_some() {
            return Err(RenderError::InitializationFailed(
                "WgpuRenderSystem is already initialized.".to_string(),
            ));
        }
        log::info!("WgpuRenderSystem: Initializing...");

        let (width, height) = window.inner_size();
        let context = pollster::block_on(WgpuGraphicsContext::new(
            window.clone_handle_arc(),
            width,
            height,
        ))
        .map_err(|e| RenderError::InitializationFailed(e.to_string()))?;

        log::info!(
            "WgpuRenderSystem: ready on \"{}\" ({:?}) at {}x{}",
            context.adapter_name,
            context.adapter_backend,
            context.size().0,
            context.size().1
        );
        self.state = Some(GpuState::new(context));
        Ok(())
    }

    /// Returns `true` once [`init`](Self::init) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Statistics of the last frame that reached the screen.
    pub fn last_frame_stats(&self) -> &RenderStats {
        &self.last_frame_stats
    }
}

impl RenderSystem for WgpuRenderSystem {
    fn resize(&mut self, width: u32, height: u32) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.context.resize(width, height) {
            state.depth_view = state.context.create_depth_view();
        }
    }

    fn surface_size(&self) -> (u32, u32) {
        self.state
            .as_ref()
            .map(|s| s.context.size())
            .unwrap_or((0, 0))
    }

    fn render(&mut self, frame: &FrameData) -> Result<RenderStats, RenderError> {
        let started = Instant::now();
        let state = self.state.as_mut().ok_or(RenderError::NotInitialized)?;

        // --- 1. Acquire Frame from Swap Chain ---
        let output = match state.context.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("WgpuRenderSystem: surface {e:?}, reconfiguring");
                state.context.reconfigure();
                return Err(RenderError::FrameSkipped(format!("{e:?}")));
            }
            Err(wgpu::SurfaceError::Timeout) => {
                return Err(RenderError::FrameSkipped("Timeout".to_string()));
            }
            Err(e) => {
                log::error!("WgpuRenderSystem: cannot acquire surface texture: {e:?}");
                return Err(RenderError::SurfaceAcquireFailed(format!("{e:?}")));
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // --- 2. Upload Frame Data ---
        let globals = GlobalsUniform::new(frame);
        state
            .context
            .queue
            .write_buffer(&state.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let (instances, cube_count) = batch_instances(&frame.objects);
        state.ensure_instance_capacity(instances.len());
        if !instances.is_empty() {
            state.context.queue.write_buffer(
                &state.instance_buffer,
                0,
                bytemuck::cast_slice(&instances),
            );
        }

        // --- 3. Record ---
        let mut encoder =
            state
                .context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Frame Encoder"),
                });

        let mut draw_calls = 0u32;
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(to_wgpu_color(frame.clear_color)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &state.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&state.pipeline);
            pass.set_bind_group(0, &state.globals_bind_group, &[]);
            pass.set_vertex_buffer(1, state.instance_buffer.slice(..));

            let batches = [
                (&state.cube, 0..cube_count as u32),
                (&state.plane, cube_count as u32..instances.len() as u32),
            ];
            for (mesh, range) in batches {
                if range.is_empty() {
                    continue;
                }
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..mesh.index_count, 0, range);
                draw_calls += 1;
            }
        }

        // --- 4. Submit & Present ---
        state.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.frame_count += 1;
        self.last_frame_stats = RenderStats {
            frame_number: self.frame_count,
            draw_calls,
            instances: instances.len() as u32,
            cpu_render_time_ms: started.elapsed().as_secs_f32() * 1000.0,
        };
        Ok(self.last_frame_stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxfall_core::math::{Mat4, Vec3};

    fn object(geometry: Geometry) -> RenderObject {
        RenderObject {
            geometry,
            model: Mat4::IDENTITY,
            color: LinearRgba::WHITE,
        }
    }

    #[test]
    fn test_gpu_layouts_match_shader() {
        assert_eq!(std::mem::size_of::<GlobalsUniform>(), 128);
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 80);
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn test_batches_cubes_before_planes() {
        let plane = Geometry::Plane {
            width: 200.0,
            height: 200.0,
        };
        let cube = Geometry::Cube { size: 2.0 };
        let objects = [object(plane), object(cube), object(cube)];
        let (instances, cube_count) = batch_instances(&objects);
        assert_eq!(instances.len(), 3);
        assert_eq!(cube_count, 2);
    }

    #[test]
    fn test_unlit_frame_is_full_bright() {
        let globals = GlobalsUniform::new(&FrameData::default());
        assert_eq!(globals.ambient, [1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_spot_light_packing() {
        let light = SpotLight {
            position: Vec3::new(-20.0, 50.0, 20.0),
            ..Default::default()
        };
        let frame = FrameData {
            light: Some(light),
            ..Default::default()
        };
        let globals = GlobalsUniform::new(&frame);
        assert_eq!(globals.light_position, [-20.0, 50.0, 20.0, 1.0]);
        assert_eq!(globals.light_direction[3], light.cos_outer());
        assert_eq!(globals.light_color[3], light.cos_inner());
        assert_eq!(globals.ambient[3], 1.0);
    }

    #[test]
    fn test_render_before_init_fails() {
        let mut system = WgpuRenderSystem::new();
        assert!(!system.is_initialized());
        assert!(matches!(
            system.render(&FrameData::default()),
            Err(RenderError::NotInitialized)
        ));
        assert_eq!(system.surface_size(), (0, 0));
    }
}
