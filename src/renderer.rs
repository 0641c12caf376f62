//! The wgpu renderer: owns surface, device and queue, and draws a [`Frame`]
//! against the retained [`Scene`]. Draw commands are flattened into one
//! aggregated vertex/index buffer per frame and rendered in painter order.

use tracing::{info, warn};
use wgpu::util::DeviceExt;
use wgpu::{CompositeAlphaMode, InstanceDescriptor, SurfaceTarget};

use crate::error::Error;
use crate::math::Point;
use crate::pipeline::{create_pipeline, Uniforms};
use crate::scene::{Frame, Scene};
use crate::tessellate::Tessellator;
use crate::vertex::Vertex;

#[inline(always)]
fn to_logical(physical_size: (u32, u32), scale_factor: f64) -> (f32, f32) {
    (
        physical_size.0 as f32 / scale_factor as f32,
        physical_size.1 as f32 / scale_factor as f32,
    )
}

pub struct Renderer<'a> {
    /// Size of the window in physical pixels.
    physical_size: (u32, u32),
    scale_factor: f64,

    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    uniforms: Uniforms,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,

    msaa_sample_count: u32,
    msaa_texture_view: Option<wgpu::TextureView>,

    tessellator: Tessellator,
    clear_color: wgpu::Color,

    temp_vertices: Vec<Vertex>,
    temp_indices: Vec<u32>,
}

impl<'a> Renderer<'a> {
    pub async fn new(
        window: impl Into<SurfaceTarget<'static>>,
        physical_size: (u32, u32),
        scale_factor: f64,
        vsync: bool,
        msaa_samples: u32,
    ) -> Result<Self, Error> {
        let size = physical_size;

        let instance = wgpu::Instance::new(&InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| Error::AdapterNotFound)?;
        info!("using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.0,
            height: size.1,
            present_mode: if vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            desired_maximum_frame_latency: 2,
            alpha_mode: CompositeAlphaMode::Opaque,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let msaa_sample_count = validate_sample_count(msaa_samples);
        let canvas_logical_size = to_logical(size, scale_factor);

        let (uniforms, uniform_buffer, bind_group, pipeline) =
            create_pipeline(canvas_logical_size, &device, config.format, msaa_sample_count);

        let mut renderer = Self {
            physical_size: size,
            scale_factor,
            surface,
            device,
            queue,
            config,
            uniforms,
            uniform_buffer,
            bind_group,
            pipeline,
            msaa_sample_count,
            msaa_texture_view: None,
            tessellator: Tessellator::new(),
            clear_color: wgpu::Color {
                r: 0.12,
                g: 0.12,
                b: 0.13,
                a: 1.0,
            },
            temp_vertices: Vec::new(),
            temp_indices: Vec::new(),
        };
        renderer.recreate_msaa_texture();
        Ok(renderer)
    }

    pub fn size(&self) -> (u32, u32) {
        self.physical_size
    }

    pub fn set_clear_color(&mut self, color: crate::color::Color) {
        let [r, g, b, a] = color.normalize();
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        };
    }

    pub fn resize(&mut self, new_physical_size: (u32, u32)) {
        if new_physical_size.0 == 0 || new_physical_size.1 == 0 {
            return;
        }
        self.physical_size = new_physical_size;
        self.config.width = new_physical_size.0;
        self.config.height = new_physical_size.1;
        self.surface.configure(&self.device, &self.config);
        self.update_uniforms();
        self.recreate_msaa_texture();
    }

    pub fn change_scale_factor(&mut self, new_scale_factor: f64) {
        self.scale_factor = new_scale_factor;
        self.update_uniforms();
    }

    fn update_uniforms(&mut self) {
        let logical = to_logical(self.physical_size, self.scale_factor);
        self.uniforms = Uniforms::new(logical.0, logical.1);
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniforms]),
        );
    }

    fn recreate_msaa_texture(&mut self) {
        if self.msaa_sample_count <= 1 {
            self.msaa_texture_view = None;
            return;
        }
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("msaa_color_texture"),
            size: wgpu::Extent3d {
                width: self.config.width,
                height: self.config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: self.msaa_sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: self.config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        self.msaa_texture_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
    }

    /// Flattens the frame into vertex/index buffers and renders it.
    ///
    /// The scene is taken mutably to collect dirty flags set by geometry
    /// changes since the last frame; the matching cached meshes are dropped.
    pub fn render(&mut self, scene: &mut Scene, frame: &Frame) -> Result<(), Error> {
        for shape in scene.take_dirty() {
            self.tessellator.invalidate(shape);
        }

        self.temp_vertices.clear();
        self.temp_indices.clear();

        for cmd in frame.commands() {
            let mesh = self.tessellator.mesh(scene, cmd.shape, cmd.style);
            if mesh.is_empty() {
                continue;
            }
            let paint = scene.paint(cmd.paint);
            let base = self.temp_vertices.len() as u32;
            for v in &mesh.vertices {
                let local = Point::new(v.position[0], v.position[1]);
                self.temp_vertices.push(Vertex {
                    position: (local + cmd.offset).to_array(),
                    color: paint.eval(local, v.t),
                });
            }
            self.temp_indices.extend(mesh.indices.iter().map(|i| base + i));
        }

        let buffers = if self.temp_indices.is_empty() {
            None
        } else {
            let vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("frame_vertex_buffer"),
                    contents: bytemuck::cast_slice(&self.temp_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            let index_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("frame_index_buffer"),
                    contents: bytemuck::cast_slice(&self.temp_indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            Some((vertex_buffer, index_buffer))
        };

        let output = self.surface.get_current_texture()?;
        let output_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let (view, resolve_target) = match &self.msaa_texture_view {
                Some(msaa_view) => (msaa_view, Some(&output_view)),
                None => (&output_view, None),
            };

            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some((vertex_buffer, index_buffer)) = &buffers {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.bind_group, &[]);
                pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.temp_indices.len() as u32, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn validate_sample_count(samples: u32) -> u32 {
    match samples {
        1 | 2 | 4 | 8 => samples,
        other => {
            warn!("unsupported MSAA sample count {other}, falling back to 4");
            4
        }
    }
}
