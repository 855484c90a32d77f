//! Optional GPU step backend on wgpu compute.
//!
//! The CPU-side grid stays authoritative: every step uploads the active
//! buffer, dispatches the transition shader, and reads the result back into
//! the inactive buffer before swapping. Interaction, drawing, and rendering
//! therefore observe identical state regardless of which backend is active.
//! Storage buffers are reallocated lazily when the grid was resized.

use std::sync::mpsc;

use crate::engine::traits::StepEngine;
use crate::error::GpuError;
use crate::grid::GridBuffer;

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GridDims {
    width: u32,
    height: u32,
}

/// Storage sized to one grid; rebuilt when dimensions change. The dims
/// uniform is owned by the bind group.
struct GridResources {
    width: u32,
    height: u32,
    input: wgpu::Buffer,
    output: wgpu::Buffer,
    staging: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Headless compute backend implementing the same step contract as the CPU
/// engine.
pub struct GpuStepEngine {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    resources: Option<GridResources>,
}

impl GpuStepEngine {
    /// Acquire an adapter and device without a surface. Fails when the host
    /// has no compatible GPU; callers fall back to the CPU engine.
    pub fn new() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .map_err(|_| GpuError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Lichen Step Device"),
            required_features: wgpu::Features::default(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: wgpu::MemoryHints::default(),
            trace: wgpu::Trace::Off,
        }))?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Life Step Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("life.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Life Step Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Life Step Pipeline"),
            layout: Some(
                &device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Life Step Pipeline Layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    push_constant_ranges: &[],
                }),
            ),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        Ok(Self {
            device,
            queue,
            pipeline,
            bind_group_layout,
            resources: None,
        })
    }

    fn ensure_resources(&mut self, width: u32, height: u32) {
        if matches!(&self.resources, Some(r) if r.width == width && r.height == height) {
            return;
        }
        log::debug!("allocating GPU step buffers for {width}x{height}");

        let cell_bytes = (width as u64 * height as u64) * std::mem::size_of::<u32>() as u64;

        let dims = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Life Dims Buffer"),
            size: std::mem::size_of::<GridDims>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.queue
            .write_buffer(&dims, 0, bytemuck::bytes_of(&GridDims { width, height }));

        let input = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Life Input Buffer"),
            size: cell_bytes,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let output = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Life Output Buffer"),
            size: cell_bytes,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let staging = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Life Staging Buffer"),
            size: cell_bytes,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Life Step Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: dims.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: input.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: output.as_entire_binding(),
                },
            ],
        });

        self.resources = Some(GridResources {
            width,
            height,
            input,
            output,
            staging,
            bind_group,
        });
    }
}

impl StepEngine for GpuStepEngine {
    fn step(&mut self, grid: &mut GridBuffer) {
        self.ensure_resources(grid.width(), grid.height());
        let Some(resources) = self.resources.as_ref() else {
            return;
        };

        let cells: Vec<u32> = grid.cells().iter().map(|&alive| alive as u32).collect();
        self.queue
            .write_buffer(&resources.input, 0, bytemuck::cast_slice(&cells));

        let cell_bytes = (cells.len() * std::mem::size_of::<u32>()) as u64;
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Life Step Encoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Life Step Pass"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &resources.bind_group, &[]);
            pass.dispatch_workgroups(grid.width().div_ceil(8), grid.height().div_ceil(8), 1);
        }
        encoder.copy_buffer_to_buffer(&resources.output, 0, &resources.staging, 0, cell_bytes);
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = resources.staging.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = self.device.poll(wgpu::MaintainBase::Wait);

        if let Ok(Ok(())) = rx.recv() {
            {
                let data = slice.get_mapped_range();
                let states: &[u32] = bytemuck::cast_slice(&data);
                let (_, next) = grid.split();
                for (cell, &state) in next.iter_mut().zip(states) {
                    *cell = state != 0;
                }
            }
            resources.staging.unmap();
            grid.swap();
        } else {
            // The generation is dropped rather than published half-read.
            log::error!("GPU step readback failed; keeping previous generation");
        }
    }

    fn name(&self) -> &str {
        "gpu"
    }
}
