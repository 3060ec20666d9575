//! The globe renderer: stars, globe, clouds, markers and the label overlay

use crate::device::GpuContext;
use crate::marker::{FlatMeshBuilder, FlatVertex, LABEL_COLOR, LABEL_SIZE, MARKER_COLOR, MARKER_RADIUS};
use crate::sphere::{uv_sphere, GlobeVertex};
use crate::stars::{generate_starfield, StarVertex, StarfieldConfig};
use crate::texture::{GlobeAssets, Texture};
use bytemuck::{Pod, Zeroable};
use nalgebra::{Matrix4, Vector3};
use std::sync::Arc;
use terraglobe_core::{Error, GlobeScene, Point3f, Result, SceneConfig, Spin};
use winit::window::Window;

/// Fallback globe color when no day map is supplied (deep ocean blue)
const FALLBACK_DAY_COLOR: [u8; 4] = [24, 70, 128, 255];

/// Camera uniform data
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view_pos: [f32; 3],
    pub _padding: f32,
}

/// Directional light uniform data
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct LightingUniform {
    pub direction: [f32; 3],
    pub ambient: f32,
}

/// Per-body uniform data for the textured sphere passes
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub struct BodyUniform {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
    pub params: [f32; 4],
}

impl BodyUniform {
    /// Uniform for a spinning body; `luma_alpha` derives fragment alpha
    /// from texture luminance (used by the cloud layer).
    pub fn from_spin(spin: &Spin, tint: [f32; 4], luma_alpha: bool) -> Self {
        Self {
            model: spin.model_matrix().into(),
            tint,
            params: [if luma_alpha { 1.0 } else { 0.0 }, 0.0, 0.0, 0.0],
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub background_color: [f64; 4],
    /// Ambient light floor, matching the original scene's ambient intensity
    pub ambient: f32,
    /// Directional light position; the shader normalizes it
    pub light_direction: [f32; 3],
    pub cloud_opacity: f32,
    pub sphere_segments: u32,
    pub sphere_rings: u32,
    pub starfield: StarfieldConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
            ambient: 0.3,
            light_direction: [5.0, 3.0, 5.0],
            cloud_opacity: 0.4,
            sphere_segments: 32,
            sphere_rings: 32,
            starfield: StarfieldConfig::default(),
        }
    }
}

/// Egui output for one frame, painted over the 3D scene
pub struct OverlayFrame {
    pub textures_delta: egui::TexturesDelta,
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub pixels_per_point: f32,
}

/// One textured sphere layer (globe surface or cloud shell)
struct SphereLayer {
    body_uniform: BodyUniform,
    body_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Renders the whole globe scene into a window surface
pub struct GlobeRenderer {
    pub gpu: GpuContext,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub config: RenderConfig,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    globe_pipeline: wgpu::RenderPipeline,
    cloud_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,
    flat_pipeline: wgpu::RenderPipeline,
    globe_layer: SphereLayer,
    cloud_layer: Option<SphereLayer>,
    star_vertex_buffer: wgpu::Buffer,
    star_count: u32,
    flat_builder: FlatMeshBuilder,
    egui_renderer: egui_wgpu::Renderer,
}

impl GlobeRenderer {
    /// Create a renderer targeting the given window.
    ///
    /// A missing day map falls back to a solid ocean color; a missing cloud
    /// map disables the cloud pass entirely.
    pub async fn new(
        window: Arc<Window>,
        assets: GlobeAssets,
        scene_config: &SceneConfig,
        config: RenderConfig,
    ) -> Result<Self> {
        let gpu = GpuContext::new().await?;

        let surface = gpu
            .instance
            .create_surface(window.clone())
            .map_err(|e| Error::Gpu(format!("Failed to create surface: {:?}", e)))?;

        let surface_caps = surface.get_capabilities(&gpu.adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let size = window.inner_size();
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &surface_config);

        // Scene-wide uniforms
        let camera_uniform = CameraUniform {
            view_proj: Matrix4::identity().into(),
            view_pos: [0.0, 0.0, 0.0],
            _padding: 0.0,
        };
        let camera_buffer = gpu.create_uniform_buffer("Camera Buffer", &camera_uniform);

        let lighting_uniform = LightingUniform {
            direction: config.light_direction,
            ambient: config.ambient,
        };
        let lighting_buffer = gpu.create_uniform_buffer("Lighting Buffer", &lighting_uniform);

        let scene_bind_group_layout =
            gpu.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    entries: &[
                        uniform_layout_entry(0),
                        uniform_layout_entry(1),
                    ],
                    label: Some("scene_bind_group_layout"),
                });

        let scene_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &scene_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lighting_buffer.as_entire_binding(),
                },
            ],
            label: Some("scene_bind_group"),
        });

        let body_bind_group_layout =
            gpu.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    entries: &[
                        uniform_layout_entry(0),
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                    label: Some("body_bind_group_layout"),
                });

        // Pipelines
        let globe_shader = gpu.create_shader_module("Globe Shader", include_str!("shaders/globe.wgsl"));
        let star_shader = gpu.create_shader_module("Star Shader", include_str!("shaders/stars.wgsl"));
        let flat_shader = gpu.create_shader_module("Flat Shader", include_str!("shaders/flat.wgsl"));

        let surface_pipeline_layout =
            gpu.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Globe Pipeline Layout"),
                    bind_group_layouts: &[&scene_bind_group_layout, &body_bind_group_layout],
                    push_constant_ranges: &[],
                });

        let scene_only_pipeline_layout =
            gpu.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Scene Pipeline Layout"),
                    bind_group_layouts: &[&scene_bind_group_layout],
                    push_constant_ranges: &[],
                });

        let globe_pipeline = build_pipeline(
            &gpu.device,
            "Globe Render Pipeline",
            &surface_pipeline_layout,
            &globe_shader,
            &[GlobeVertex::desc()],
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
            DepthMode::ReadWrite,
        );

        // The cloud shell is translucent and must not occlude the markers
        // floating just above it.
        let cloud_pipeline = build_pipeline(
            &gpu.device,
            "Cloud Render Pipeline",
            &surface_pipeline_layout,
            &globe_shader,
            &[GlobeVertex::desc()],
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
            DepthMode::ReadOnly,
        );

        let star_pipeline = build_pipeline(
            &gpu.device,
            "Star Render Pipeline",
            &scene_only_pipeline_layout,
            &star_shader,
            &[StarVertex::desc()],
            surface_format,
            wgpu::PrimitiveTopology::PointList,
            DepthMode::ReadOnly,
        );

        let flat_pipeline = build_pipeline(
            &gpu.device,
            "Flat Render Pipeline",
            &scene_only_pipeline_layout,
            &flat_shader,
            &[FlatVertex::desc()],
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
            DepthMode::ReadWrite,
        );

        // Globe surface layer
        let day_texture = match &assets.day_map {
            Some(img) => Texture::from_image(&gpu.device, &gpu.queue, img, "Day Map")?,
            None => Texture::solid_color(&gpu.device, &gpu.queue, FALLBACK_DAY_COLOR, "Day Map Fallback")?,
        };
        let globe_layer = build_sphere_layer(
            &gpu,
            &body_bind_group_layout,
            &day_texture,
            scene_config.globe_radius,
            config.sphere_segments,
            config.sphere_rings,
            BodyUniform::from_spin(&Spin::new(scene_config.globe_speed), [1.0, 1.0, 1.0, 1.0], false),
            "Globe",
        );

        // Optional cloud layer
        let cloud_layer = match &assets.cloud_map {
            Some(img) => {
                let cloud_texture = Texture::from_image(&gpu.device, &gpu.queue, img, "Cloud Map")?;
                Some(build_sphere_layer(
                    &gpu,
                    &body_bind_group_layout,
                    &cloud_texture,
                    scene_config.cloud_radius,
                    config.sphere_segments,
                    config.sphere_rings,
                    BodyUniform::from_spin(
                        &Spin::new(scene_config.cloud_speed),
                        [1.0, 1.0, 1.0, config.cloud_opacity],
                        true,
                    ),
                    "Clouds",
                ))
            }
            None => None,
        };

        // Starfield
        let stars = generate_starfield(&config.starfield);
        let star_vertex_buffer =
            gpu.create_buffer_init("Star Vertex Buffer", &stars, wgpu::BufferUsages::VERTEX);

        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, surface_format, None, 1);

        Ok(Self {
            gpu,
            surface,
            surface_config,
            config,
            camera_uniform,
            camera_buffer,
            scene_bind_group,
            globe_pipeline,
            cloud_pipeline,
            star_pipeline,
            flat_pipeline,
            globe_layer,
            cloud_layer,
            star_vertex_buffer,
            star_count: stars.len() as u32,
            flat_builder: FlatMeshBuilder::new(),
            egui_renderer,
        })
    }

    /// Update camera view and projection matrices
    pub fn update_camera(
        &mut self,
        view_matrix: Matrix4<f32>,
        proj_matrix: Matrix4<f32>,
        camera_pos: Vector3<f32>,
    ) {
        let view_proj = proj_matrix * view_matrix;
        self.camera_uniform.view_proj = view_proj.into();
        self.camera_uniform.view_pos = [camera_pos.x, camera_pos.y, camera_pos.z];

        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );
    }

    /// Resize the renderer surface
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.surface_config.width = new_size.width;
            self.surface_config.height = new_size.height;
            self.surface.configure(&self.gpu.device, &self.surface_config);
        }
    }

    /// Create the depth texture for this frame
    fn create_depth_texture(&self) -> wgpu::Texture {
        let size = wgpu::Extent3d {
            width: self.surface_config.width,
            height: self.surface_config.height,
            depth_or_array_layers: 1,
        };

        self.gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
    }

    /// Render one frame of the scene as seen from `viewer`.
    ///
    /// Marker and label geometry is rebuilt from the scene's current
    /// rotation and pin visibility; the optional overlay is painted on top
    /// in a second pass.
    pub fn render(
        &mut self,
        scene: &GlobeScene,
        viewer: Point3f,
        overlay: Option<OverlayFrame>,
    ) -> Result<()> {
        // Per-frame body uniforms from the scene's spin state
        self.globe_layer.body_uniform.model = scene.globe_spin.model_matrix().into();
        self.gpu.queue.write_buffer(
            &self.globe_layer.body_buffer,
            0,
            bytemuck::bytes_of(&self.globe_layer.body_uniform),
        );
        if let Some(clouds) = &mut self.cloud_layer {
            clouds.body_uniform.model = scene.cloud_spin.model_matrix().into();
            self.gpu
                .queue
                .write_buffer(&clouds.body_buffer, 0, bytemuck::bytes_of(&clouds.body_uniform));
        }

        // Markers ride the globe; labels face the viewer
        self.flat_builder.clear();
        for pin in scene.pins() {
            self.flat_builder
                .push_marker(scene.pin_world_position(pin), MARKER_RADIUS, MARKER_COLOR);
            if pin.is_visible() {
                self.flat_builder.push_label_quad(
                    scene.label_world_anchor(pin),
                    viewer,
                    LABEL_SIZE,
                    LABEL_COLOR,
                );
            }
        }
        let flat_vertex_buffer = self.gpu.create_buffer_init(
            "Flat Vertex Buffer",
            &self.flat_builder.vertices,
            wgpu::BufferUsages::VERTEX,
        );
        let flat_index_buffer = self.gpu.create_buffer_init(
            "Flat Index Buffer",
            &self.flat_builder.indices,
            wgpu::BufferUsages::INDEX,
        );
        let flat_index_count = self.flat_builder.indices.len() as u32;

        let output = self
            .surface
            .get_current_texture()
            .map_err(|e| Error::Gpu(format!("Failed to get surface texture: {:?}", e)))?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let depth_texture = self.create_depth_texture();
        let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Globe Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Globe Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.config.background_color[0],
                            g: self.config.background_color[1],
                            b: self.config.background_color[2],
                            a: self.config.background_color[3],
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.scene_bind_group, &[]);

            // Stars first; they never write depth
            render_pass.set_pipeline(&self.star_pipeline);
            render_pass.set_vertex_buffer(0, self.star_vertex_buffer.slice(..));
            render_pass.draw(0..self.star_count, 0..1);

            // Opaque globe surface
            render_pass.set_pipeline(&self.globe_pipeline);
            render_pass.set_bind_group(1, &self.globe_layer.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.globe_layer.vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(self.globe_layer.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.globe_layer.index_count, 0, 0..1);

            // Translucent cloud shell
            if let Some(clouds) = &self.cloud_layer {
                render_pass.set_pipeline(&self.cloud_pipeline);
                render_pass.set_bind_group(1, &clouds.bind_group, &[]);
                render_pass.set_vertex_buffer(0, clouds.vertex_buffer.slice(..));
                render_pass.set_index_buffer(clouds.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..clouds.index_count, 0, 0..1);
            }

            // Pin markers and any shown labels
            if flat_index_count > 0 {
                render_pass.set_pipeline(&self.flat_pipeline);
                render_pass.set_vertex_buffer(0, flat_vertex_buffer.slice(..));
                render_pass.set_index_buffer(flat_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..flat_index_count, 0, 0..1);
            }
        }

        // Label text overlay in a separate pass over the finished frame
        let mut user_cmd_bufs = Vec::new();
        let mut freed_textures = Vec::new();
        if let Some(overlay) = overlay {
            let screen = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [self.surface_config.width, self.surface_config.height],
                pixels_per_point: overlay.pixels_per_point,
            };

            for (id, delta) in &overlay.textures_delta.set {
                self.egui_renderer
                    .update_texture(&self.gpu.device, &self.gpu.queue, *id, delta);
            }
            user_cmd_bufs = self.egui_renderer.update_buffers(
                &self.gpu.device,
                &self.gpu.queue,
                &mut encoder,
                &overlay.primitives,
                &screen,
            );

            {
                let mut overlay_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Overlay Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
                self.egui_renderer
                    .render(&mut overlay_pass, &overlay.primitives, &screen);
            }

            freed_textures = overlay.textures_delta.free;
        }

        self.gpu
            .queue
            .submit(user_cmd_bufs.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        for id in &freed_textures {
            self.egui_renderer.free_texture(id);
        }

        Ok(())
    }
}

/// Depth usage of a pipeline
#[derive(Clone, Copy, PartialEq)]
enum DepthMode {
    ReadWrite,
    ReadOnly,
}

fn uniform_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn build_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    buffers: &[wgpu::VertexBufferLayout],
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    depth: DepthMode,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_main",
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: depth == DepthMode::ReadWrite,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}

#[allow(clippy::too_many_arguments)]
fn build_sphere_layer(
    gpu: &GpuContext,
    layout: &wgpu::BindGroupLayout,
    texture: &Texture,
    radius: f32,
    segments: u32,
    rings: u32,
    body_uniform: BodyUniform,
    label: &str,
) -> SphereLayer {
    let mesh = uv_sphere(radius, segments, rings);
    let vertex_buffer = gpu.create_buffer_init(
        &format!("{} Vertex Buffer", label),
        &mesh.vertices,
        wgpu::BufferUsages::VERTEX,
    );
    let index_buffer = gpu.create_buffer_init(
        &format!("{} Index Buffer", label),
        &mesh.indices,
        wgpu::BufferUsages::INDEX,
    );

    let body_buffer = gpu.create_uniform_buffer(&format!("{} Body Buffer", label), &body_uniform);

    let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: body_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&texture.sampler),
            },
        ],
        label: Some(&format!("{}_bind_group", label.to_lowercase())),
    });

    SphereLayer {
        body_uniform,
        body_buffer,
        bind_group,
        vertex_buffer,
        index_buffer,
        index_count: mesh.index_count(),
    }
}
