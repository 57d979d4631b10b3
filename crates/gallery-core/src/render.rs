pub mod helpers;

use crate::camera::Camera;
use crate::config::GalleryConfig;
use crate::geometry::{plane_geometry, PlaneVertex};
use crate::sink::{FrameUniforms, PlaneId, PlaneSink, SceneRenderer};
use glam::Mat4;
use wgpu::util::DeviceExt;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PlaneUniforms {
    mvp: [[f32; 4]; 4],
    resolution: [f32; 4],
    time: f32,
    strength: f32,
    _pad: [f32; 2],
}

struct Plane {
    uniform_buffer: wgpu::Buffer,
    field_tex: wgpu::Texture,
    field_view: wgpu::TextureView,
    field_size: usize,
    _color_tex: wgpu::Texture,
    color_view: wgpu::TextureView,
    bind_group: wgpu::BindGroup,
    transform: Mat4,
}

/// Draws every plane with its color image displaced by its field texture.
pub struct PlaneRenderer<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    /// sRGB view of the surface format; shader output is linear.
    view_format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    planes: Vec<Plane>,
    displacement_strength: f32,
    width: u32,
    height: u32,
}

impl<'a> PlaneRenderer<'a> {
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'a>,
        width: u32,
        height: u32,
        gallery: &GalleryConfig,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let (format, view_format, view_formats) = helpers::surface_formats(&caps.formats)
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // Transparent canvas over the page when the platform allows it
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats,
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("plane_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::PLANE_WGSL.into()),
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("plane_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    // uniforms
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    // uTexture
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    // uDataTexture, read with textureLoad (f32 is not filterable by default)
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                    },
                    count: None,
                },
            ],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("plane_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PlaneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        };
        let pipeline = helpers::make_plane_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            vertex_layout,
            view_format,
        );
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let (vertices, indices) = plane_geometry(gallery.plane_segments);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_vb"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_ib"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::info!(
            "[render] surface {}x{} format={:?} view={:?} alpha={:?}",
            width,
            height,
            format,
            view_format,
            alpha_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            pipeline,
            bind_group_layout,
            sampler,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            planes: Vec::new(),
            displacement_strength: gallery.displacement_strength,
            width,
            height,
        })
    }

    #[inline]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    #[inline]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    #[inline]
    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// 1×1 transparent texture used until an image finishes loading.
    pub fn placeholder_texture(&self) -> wgpu::Texture {
        let (tex, _view) = helpers::create_rgba8_texture(
            &self.device,
            &self.queue,
            "placeholder_tex",
            1,
            1,
            &[0, 0, 0, 0],
        );
        tex
    }

    /// Create a plane bound to `color`, with a zeroed field texture of `field_size`.
    pub fn add_plane(&mut self, color: wgpu::Texture, field_size: usize) -> PlaneId {
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("plane_uniforms"),
            size: std::mem::size_of::<PlaneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let (field_tex, field_view) = helpers::create_field_texture(&self.device, field_size);
        let bind_group = self.make_bind_group(&uniform_buffer, &color_view, &field_view);
        self.planes.push(Plane {
            uniform_buffer,
            field_tex,
            field_view,
            field_size,
            _color_tex: color,
            color_view,
            bind_group,
            // Zero scale until the first layout lands
            transform: Mat4::ZERO,
        });
        PlaneId(self.planes.len() - 1)
    }

    /// Swap the plane's color image, e.g. once an asynchronous load completes.
    pub fn set_color_texture(&mut self, plane: PlaneId, color: wgpu::Texture) {
        let Some(p) = self.planes.get(plane.0) else {
            log::warn!("[render] set_color_texture on unknown plane {}", plane.0);
            return;
        };
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.make_bind_group(&p.uniform_buffer, &color_view, &p.field_view);
        let p = &mut self.planes[plane.0];
        p._color_tex = color;
        p.color_view = color_view;
        p.bind_group = bind_group;
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure at the current size, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn make_bind_group(
        &self,
        uniform_buffer: &wgpu::Buffer,
        color: &wgpu::TextureView,
        field: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("plane_bg"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(color),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(field),
                },
            ],
        })
    }
}

impl PlaneSink for PlaneRenderer<'_> {
    fn set_transform(&mut self, plane: PlaneId, transform: Mat4) {
        if let Some(p) = self.planes.get_mut(plane.0) {
            p.transform = transform;
        }
    }

    fn upload_field(&mut self, plane: PlaneId, size: usize, texels: &[f32]) {
        let Some(p) = self.planes.get_mut(plane.0) else {
            return;
        };
        if p.field_size != size {
            let (tex, view) = helpers::create_field_texture(&self.device, size);
            p.field_tex = tex;
            p.field_view = view;
            p.field_size = size;
            let p = &self.planes[plane.0];
            let bind_group = self.make_bind_group(&p.uniform_buffer, &p.color_view, &p.field_view);
            self.planes[plane.0].bind_group = bind_group;
        }
        helpers::write_full_texture(
            &self.queue,
            &self.planes[plane.0].field_tex,
            helpers::field_bytes_per_texel(),
            bytemuck::cast_slice(texels),
        );
    }
}

impl SceneRenderer for PlaneRenderer<'_> {
    type Error = RenderError;

    fn render(&mut self, camera: &Camera, frame: &FrameUniforms) -> Result<(), RenderError> {
        let view_proj = camera.view_projection();
        for p in &self.planes {
            let u = PlaneUniforms {
                mvp: (view_proj * p.transform).to_cols_array_2d(),
                resolution: frame.resolution.to_array(),
                time: frame.time,
                strength: self.displacement_strength,
                _pad: [0.0; 2],
            };
            self.queue
                .write_buffer(&p.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }

        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("plane_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            for p in &self.planes {
                rpass.set_bind_group(0, &p.bind_group, &[]);
                rpass.draw_indexed(0..self.index_count, 0, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
