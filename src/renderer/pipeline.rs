//! Line-art renderer: the whole frame is one alpha-blended triangle list

use super::vertex::{Vertex, colors};
use crate::Arena;
use crate::error::SetupError;

/// Vertices the GPU buffer has room for before it first grows
const INITIAL_CAPACITY: usize = 4096;

/// GPU side of the canvas
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Room in `vertex_buffer`, in vertices
    capacity: usize,
    /// Frame vertices after the move to clip space
    clip_vertices: Vec<Vertex>,
    arena: Arena,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        arena: Arena,
    ) -> Result<Self, SetupError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("space-rocks"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await
            .map_err(|e| SetupError::Device(e.to_string()))?;

        let config = surface
            .get_default_config(adapter, width, height)
            .ok_or_else(|| SetupError::Surface("canvas not supported by the adapter".into()))?;
        surface.configure(&device, &config);

        let pipeline = line_art_pipeline(&device, config.format);
        let vertex_buffer = vertex_buffer(&device, INITIAL_CAPACITY);

        log::info!("Renderer ready: {}x{} ({:?})", width, height, config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            capacity: INITIAL_CAPACITY,
            clip_vertices: Vec::with_capacity(INITIAL_CAPACITY),
            arena,
        })
    }

    /// Reconfigure after the surface was lost
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw one frame of screen-space vertices over a cleared background
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let arena = self.arena;
        self.clip_vertices.clear();
        self.clip_vertices.extend(vertices.iter().map(|v| {
            let (x, y) = screen_to_clip(arena, v.position[0], v.position[1]);
            Vertex::new(x, y, v.color)
        }));

        if self.clip_vertices.len() > self.capacity {
            self.capacity = self.clip_vertices.len().next_power_of_two();
            log::debug!("Vertex buffer grown to {} vertices", self.capacity);
            self.vertex_buffer = vertex_buffer(&self.device, self.capacity);
        }
        if !self.clip_vertices.is_empty() {
            self.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&self.clip_vertices),
            );
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("frame") });

        {
            let [r, g, b, a] = colors::BACKGROUND.map(f64::from);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("line-art"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });

            if !self.clip_vertices.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..self.clip_vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }
}

fn line_art_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::include_wgsl!("shader.wgsl"));
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("line-art"),
        layout: None,
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                // Wreck parts fade out through alpha
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("line-art vertices"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Screen pixels (origin top-left, y down) to clip space. The arena fills
/// the viewport; the canvas keeps its aspect ratio in CSS.
fn screen_to_clip(arena: Arena, x: f32, y: f32) -> (f32, f32) {
    (x / arena.width * 2.0 - 1.0, 1.0 - y / arena.height * 2.0)
}
