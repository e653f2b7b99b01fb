//! Main renderer managing wgpu state and drawing the point cloud.

use crate::{
    camera::{CameraUniform, OrbitCamera},
    pipeline::{create_camera_bind_group_layout, create_point_pipeline, VERTICES_PER_POINT},
    texture::Texture,
};
use anyhow::Result;
use engine_core::{PointBuffer, PointVertex};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Presentation options chosen at startup.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub vsync: bool,
    /// Sprite edge length in world units.
    pub point_size: f32,
    /// Initial capacity of the point vertex buffer.
    pub point_capacity: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            vsync: true,
            point_size: 0.035,
            point_capacity: engine_core::DEFAULT_POINT_COUNT,
        }
    }
}

/// Main renderer state.
pub struct Renderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    point_pipeline: wgpu::RenderPipeline,

    camera_bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    camera_uniform: CameraUniform,

    depth_texture: Texture,

    /// One `PointVertex` per point, drawn instanced.
    point_buffer: wgpu::Buffer,
    point_capacity: usize,
    point_count: u32,

    point_size: f32,
}

impl Renderer {
    /// Create a new renderer for the given window.
    pub async fn new(window: Arc<Window>, options: RenderOptions) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        log::info!("Using GPU: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        // Mailbox when vsync is wanted and available, otherwise the matching Auto mode.
        let present_mode = if options.vsync {
            surface_caps
                .present_modes
                .iter()
                .find(|m| matches!(m, wgpu::PresentMode::Mailbox))
                .copied()
                .unwrap_or(wgpu::PresentMode::AutoVsync)
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout = create_camera_bind_group_layout(&device);
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let point_pipeline = create_point_pipeline(&device, config.format, &camera_bind_group_layout);
        let depth_texture = Texture::create_depth_texture(&device, config.width, config.height, "Depth Texture");

        let point_capacity = options.point_capacity.max(1);
        let point_buffer = create_point_buffer(&device, point_capacity);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            point_pipeline,
            camera_bind_group,
            camera_buffer,
            camera_uniform,
            depth_texture,
            point_buffer,
            point_capacity,
            point_count: 0,
            point_size: options.point_size,
        })
    }

    /// Handle window resize.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture =
                Texture::create_depth_texture(&self.device, self.config.width, self.config.height, "Depth Texture");
        }
    }

    /// Copy the point buffer to the GPU if anything changed since the last upload.
    pub fn upload_points(&mut self, points: &mut PointBuffer) {
        let dirty = points.take_dirty();
        if !dirty.any() && points.len() as u32 == self.point_count {
            return;
        }
        if points.len() > self.point_capacity {
            log::debug!("Growing point vertex buffer to {} points", points.len());
            self.point_capacity = points.len();
            self.point_buffer = create_point_buffer(&self.device, self.point_capacity);
        }
        let vertices = points.vertices();
        self.queue
            .write_buffer(&self.point_buffer, 0, bytemuck::cast_slice(&vertices));
        self.point_count = vertices.len() as u32;
    }

    /// Update camera uniform.
    pub fn update_camera(&mut self, camera: &OrbitCamera) {
        self.camera_uniform.update(camera, self.point_size);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }

    /// Draw one frame and present it.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Points Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if self.point_count > 0 {
                render_pass.set_pipeline(&self.point_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.point_buffer.slice(..));
                render_pass.draw(0..VERTICES_PER_POINT, 0..self.point_count);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Get window dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

fn create_point_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Point Buffer"),
        size: (capacity * std::mem::size_of::<PointVertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
