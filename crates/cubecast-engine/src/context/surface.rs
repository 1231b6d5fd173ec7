use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::device::{DepthTarget, Gpu, GpuInit, GraphicsError, SurfaceErrorAction};
use crate::transform::TransformUniform;

use super::{BufferDesc, BufferUsage, DrawCall, GraphicsContext, ProgramDesc};

/// `GraphicsContext` backed by a window surface.
///
/// Owns the `Gpu` and a depth target sized to the surface.
pub struct WgpuContext<'w> {
    gpu: Gpu<'w>,
    depth: DepthTarget,
}

/// Linked pipeline plus the uniform buffer its transforms live in.
pub struct WgpuProgram {
    pipeline: wgpu::RenderPipeline,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl<'w> WgpuContext<'w> {
    /// Acquires a device and configured surface for `window`.
    ///
    /// This is the only fallible step of startup; nothing is uploaded before it succeeds.
    pub async fn acquire(window: &'w Window, init: GpuInit) -> Result<Self, GraphicsError> {
        let gpu = Gpu::new(window, init)
            .await
            .map_err(|e| GraphicsError::unavailable(&e))?;

        let size = gpu.size();
        let depth = DepthTarget::new(gpu.device(), size.width, size.height);

        Ok(Self { gpu, depth })
    }

    /// Reconfigures surface and depth target. Returns `false` for a deferred 0x0 resize.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) -> bool {
        if !self.gpu.resize(new_size) {
            return false;
        }
        self.depth
            .resize(self.gpu.device(), new_size.width, new_size.height);
        true
    }
}

impl GraphicsContext for WgpuContext<'_> {
    type Buffer = wgpu::Buffer;
    type Program = WgpuProgram;

    fn surface_size(&self) -> (u32, u32) {
        let size = self.gpu.size();
        (size.width, size.height)
    }

    fn create_buffer(&mut self, desc: &BufferDesc<'_>) -> wgpu::Buffer {
        let usage = match desc.usage {
            BufferUsage::Vertex => wgpu::BufferUsages::VERTEX,
            BufferUsage::Index => wgpu::BufferUsages::INDEX,
        };

        self.gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(desc.label),
                contents: desc.contents,
                usage,
            })
    }

    fn create_program(&mut self, desc: &ProgramDesc<'_>) -> WgpuProgram {
        let device = self.gpu.device();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(desc.label),
            source: wgpu::ShaderSource::Wgsl(desc.source.into()),
        });

        let uniform_size = std::mem::size_of::<TransformUniform>() as u64;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cubecast transforms bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(uniform_size),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cubecast pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        // One tightly packed buffer per attribute, bound in attribute order.
        let attributes: Vec<wgpu::VertexAttribute> = desc
            .attributes
            .iter()
            .map(|a| wgpu::VertexAttribute {
                format: float_format(a.components()),
                offset: 0,
                shader_location: a.location(),
            })
            .collect();

        let buffers: Vec<wgpu::VertexBufferLayout<'_>> = attributes
            .iter()
            .map(|attr| wgpu::VertexBufferLayout {
                array_stride: attr.format.size(),
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: std::slice::from_ref(attr),
            })
            .collect();

        let depth_stencil = desc.depth_test.then(|| wgpu::DepthStencilState {
            format: DepthTarget::FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &buffers,
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.gpu.surface_format(),
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // Face winding is mixed; culling would drop visible faces.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cubecast transforms ubo"),
            size: uniform_size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("cubecast transforms bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });

        WgpuProgram {
            pipeline,
            uniforms,
            bind_group,
        }
    }

    fn upload_transforms(&mut self, program: &WgpuProgram, transforms: &TransformUniform) {
        self.gpu
            .queue()
            .write_buffer(&program.uniforms, 0, bytemuck::bytes_of(transforms));
    }

    fn draw_indexed(&mut self, call: &DrawCall<'_, Self>) -> Result<(), SurfaceErrorAction> {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => return Err(self.gpu.handle_surface_error(err)),
        };

        let [r, g, b, a] = call.clear.map(f64::from);

        // Render pass borrows frame.encoder; dropped before submit() takes frame.
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("cubecast cube pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.depth.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DepthTarget::CLEAR),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&call.program.pipeline);
            rpass.set_bind_group(0, &call.program.bind_group, &[]);
            for (slot, buffer) in call.vertex_buffers.iter().enumerate() {
                rpass.set_vertex_buffer(slot as u32, buffer.slice(..));
            }
            rpass.set_index_buffer(call.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..call.index_count, 0, 0..1);
        }

        self.gpu.submit(frame);
        Ok(())
    }
}

/// Panics outside 1..=4; `VertexAttribute::new` enforces the same range.
fn float_format(components: u32) -> wgpu::VertexFormat {
    match components {
        1 => wgpu::VertexFormat::Float32,
        2 => wgpu::VertexFormat::Float32x2,
        3 => wgpu::VertexFormat::Float32x3,
        4 => wgpu::VertexFormat::Float32x4,
        n => panic!("vertex attributes carry 1 to 4 floats, got {n}"),
    }
}
