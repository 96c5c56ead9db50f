//! WebGPU uniform sink
//!
//! Owns the uniform and storage buffers the cave shader binds, and rewrites
//! them from `FrameUniforms` each frame. Pipeline and surface setup belong to
//! the host.

use wgpu::util::DeviceExt;

use super::uniforms::{FrameUniforms, Globals, UniformSink};

pub struct GpuUniforms {
    queue: wgpu::Queue,
    /// `Globals` (binding 0)
    pub globals_buffer: wgpu::Buffer,
    /// `caveHeights` as a storage array of f32 (binding 1)
    pub cave_buffer: wgpu::Buffer,
    texel_count: usize,
}

impl GpuUniforms {
    pub fn new(device: &wgpu::Device, queue: wgpu::Queue, texel_count: usize) -> Self {
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&FrameUniforms::new(0).globals()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let cave_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cave_heights"),
            size: (std::mem::size_of::<f32>() * texel_count) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!(
            "Created uniform buffers: globals={}B, cave_heights={} texels",
            std::mem::size_of::<Globals>(),
            texel_count
        );

        Self {
            queue,
            globals_buffer,
            cave_buffer,
            texel_count,
        }
    }

    /// Bind group layout entries matching the buffers above
    pub fn layout_entries() -> [wgpu::BindGroupLayoutEntry; 2] {
        [
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ]
    }

    pub fn bind_group(&self, device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cave_bind_group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: self.cave_buffer.as_entire_binding(),
                },
            ],
        })
    }
}

impl UniformSink for GpuUniforms {
    fn cave_texel_count(&self) -> usize {
        self.texel_count
    }

    fn upload(&mut self, uniforms: &FrameUniforms) {
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&uniforms.globals()));

        if !uniforms.cave_heights.is_empty() {
            self.queue.write_buffer(
                &self.cave_buffer,
                0,
                bytemuck::cast_slice(&uniforms.cave_heights),
            );
        }
    }
}
