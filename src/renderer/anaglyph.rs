//! Red/cyan anaglyph renderer (WebGPU)
//!
//! The batch is drawn twice, once from each eye. The left eye writes only the
//! red channel and the right eye only green and blue, so the two views land in
//! the same frame for red/cyan glasses. Each eye clears and tests its own depth
//! buffer, so nearer geometry hides farther geometry regardless of draw order.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use wgpu::util::DeviceExt;

use super::batch::SceneBatch;
use super::vertex::Vertex;
use crate::config::GameConfig;
use crate::projection::eye_distance;

/// One of the two stereo views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    /// Sign of the horizontal camera offset
    pub fn side(self) -> f32 {
        match self {
            Eye::Left => -1.0,
            Eye::Right => 1.0,
        }
    }

    /// Channels this eye writes
    pub fn write_mask(self) -> wgpu::ColorWrites {
        match self {
            Eye::Left => wgpu::ColorWrites::RED,
            Eye::Right => wgpu::ColorWrites::GREEN | wgpu::ColorWrites::BLUE,
        }
    }
}

/// View-projection for a camera at `(offset_x, 0, eye_distance)`.
///
/// Both eyes converge on the origin, so the UI on the z = 0 plane sits at
/// screen depth with close to no parallax.
pub fn camera_view_proj(viewport: Vec2, vfov: f32, offset_x: f32) -> Mat4 {
    let eye_z = eye_distance(viewport.y);
    let aspect = viewport.x / viewport.y.max(1.0);
    let view = Mat4::look_at_rh(Vec3::new(offset_x, 0.0, eye_z), Vec3::ZERO, Vec3::Y);
    let projection = Mat4::perspective_rh(vfov, aspect, eye_z / 10.0, eye_z * 10.0);
    projection * view
}

/// Camera for one eye, or `None` while the canvas has no area
fn eye_camera(eye: Eye, viewport: Vec2, config: &GameConfig) -> Option<Mat4> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let offset = eye.side() * config.eye_separation / 2.0;
    Some(camera_view_proj(viewport, config.vfov(), offset))
}

/// Where a scene point appears on the canvas, in CSS pixels from the top-left,
/// as seen from between the eyes. `None` for points behind the camera.
pub fn project_to_canvas(point: Vec3, viewport: Vec2, vfov: f32) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    let clip = camera_view_proj(viewport, vfov, 0.0) * point.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.x,
        (1.0 - ndc.y) * 0.5 * viewport.y,
    ))
}

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Nearest fragment wins; lines and triangles share the buffer
fn depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Camera uniform data (matches WGSL struct)
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

/// Pipelines and buffers for one eye
struct EyePass {
    eye: Eye,
    lines: wgpu::RenderPipeline,
    triangles: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct AnaglyphRenderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    passes: Vec<EyePass>,
    depth_view: wgpu::TextureView,
    /// Surface size in physical pixels
    pub size: (u32, u32),
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    eye: Eye,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(match (eye, topology) {
            (Eye::Left, wgpu::PrimitiveTopology::LineList) => "left_lines",
            (Eye::Left, _) => "left_triangles",
            (Eye::Right, wgpu::PrimitiveTopology::LineList) => "right_lines",
            (Eye::Right, _) => "right_triangles",
        }),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: eye.write_mask(),
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(depth_state()),
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

impl AnaglyphRenderer {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("curveball-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("anaglyph_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("anaglyph.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("anaglyph_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let passes = Eye::BOTH
            .iter()
            .map(|&eye| {
                let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("camera"),
                    contents: bytemuck::bytes_of(&CameraUniform {
                        view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                    }),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("camera_bind_group"),
                    layout: &bind_group_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: camera_buffer.as_entire_binding(),
                    }],
                });
                EyePass {
                    eye,
                    lines: create_pipeline(
                        &device,
                        &pipeline_layout,
                        &shader,
                        config.format,
                        wgpu::PrimitiveTopology::LineList,
                        eye,
                    ),
                    triangles: create_pipeline(
                        &device,
                        &pipeline_layout,
                        &shader,
                        config.format,
                        wgpu::PrimitiveTopology::TriangleList,
                        eye,
                    ),
                    camera_buffer,
                    bind_group,
                }
            })
            .collect();

        Ok(Self {
            surface,
            device,
            queue,
            config,
            passes,
            depth_view,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, &self.config);
        }
    }

    /// Draw the batch for both eyes. `viewport` is the canvas size in CSS pixels.
    /// Nothing is drawn while the canvas is collapsed.
    pub fn render(
        &mut self,
        batch: &SceneBatch,
        viewport: Vec2,
        game_config: &GameConfig,
    ) -> Result<(), wgpu::SurfaceError> {
        for pass in &self.passes {
            let Some(view_proj) = eye_camera(pass.eye, viewport, game_config) else {
                return Ok(());
            };
            let camera = CameraUniform {
                view_proj: view_proj.to_cols_array_2d(),
            };
            self.queue
                .write_buffer(&pass.camera_buffer, 0, bytemuck::bytes_of(&camera));
        }

        let vertex_buffer = |label: &str, vertices: &[Vertex]| {
            (!vertices.is_empty()).then(|| {
                self.device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(label),
                        contents: bytemuck::cast_slice(vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    })
            })
        };
        let lines = vertex_buffer("lines", &batch.lines);
        let triangles = vertex_buffer("triangles", &batch.triangles);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("anaglyph_encoder"),
            });

        let [r, g, b, a] = batch.clear_color.map(f64::from);
        for (i, pass) in self.passes.iter().enumerate() {
            // First eye clears color, second eye draws over it into the other channels.
            // Depth is cleared for both.
            let load = if i == 0 {
                wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a })
            } else {
                wgpu::LoadOp::Load
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("anaglyph_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            render_pass.set_bind_group(0, &pass.bind_group, &[]);

            if let Some(buffer) = &lines {
                render_pass.set_pipeline(&pass.lines);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..batch.lines.len() as u32, 0..1);
            }
            if let Some(buffer) = &triangles {
                render_pass.set_pipeline(&pass.triangles);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..batch.triangles.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use std::f32::consts::PI;

    fn ndc(m: Mat4, p: Vec3) -> Vec3 {
        let clip = m * Vec4::new(p.x, p.y, p.z, 1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn test_z0_plane_maps_one_unit_per_pixel() {
        // With a 60° vfov the visible half-height at z = 0 equals half the canvas height
        let viewport = Vec2::new(800.0, 600.0);
        let m = camera_view_proj(viewport, PI / 3.0, 0.0);
        let top = ndc(m, Vec3::new(0.0, 300.0, 0.0));
        assert!((top.y - 1.0).abs() < 1e-4);
        let right = ndc(m, Vec3::new(400.0, 0.0, 0.0));
        assert!((right.x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_eyes_agree_on_z0_and_disagree_off_plane() {
        let viewport = Vec2::new(800.0, 600.0);
        let left = camera_view_proj(viewport, PI / 3.0, -6.0);
        let right = camera_view_proj(viewport, PI / 3.0, 6.0);

        let origin_l = ndc(left, Vec3::ZERO);
        let origin_r = ndc(right, Vec3::ZERO);
        assert!((origin_l.x - origin_r.x).abs() < 1e-5);

        let back_l = ndc(left, Vec3::new(0.0, 0.0, -300.0));
        let back_r = ndc(right, Vec3::new(0.0, 0.0, -300.0));
        assert!((back_l.x - back_r.x).abs() > 1e-3);
    }

    #[test]
    fn test_paddle_in_front_of_ball_passes_depth_test() {
        let state = depth_state();
        assert_eq!(state.format, DEPTH_FORMAT);
        assert!(state.depth_write_enabled);
        assert_eq!(state.depth_compare, wgpu::CompareFunction::Less);

        // Paddle face at z = 300 must be nearer than a ball cap at z = 280
        let config = GameConfig::default();
        let viewport = Vec2::new(800.0, 600.0);
        let m = eye_camera(Eye::Left, viewport, &config).unwrap();
        let paddle = ndc(m, Vec3::new(0.0, 0.0, 300.0));
        let ball = ndc(m, Vec3::new(0.0, 0.0, 280.0));
        assert!(paddle.z < ball.z);
        assert!((0.0..1.0).contains(&paddle.z));
    }

    #[test]
    fn test_collapsed_canvas_has_no_camera() {
        let config = GameConfig::default();
        for viewport in [Vec2::new(800.0, 0.0), Vec2::new(0.0, 600.0), Vec2::ZERO] {
            assert!(eye_camera(Eye::Left, viewport, &config).is_none());
            assert!(project_to_canvas(Vec3::ZERO, viewport, config.vfov()).is_none());
        }

        let viewport = Vec2::new(800.0, 600.0);
        let right = eye_camera(Eye::Right, viewport, &config);
        let expected = camera_view_proj(viewport, config.vfov(), config.eye_separation / 2.0);
        assert_eq!(right, Some(expected));
    }

    #[test]
    fn test_labels_follow_camera_field_of_view() {
        let viewport = Vec2::new(800.0, 600.0);
        let button = Vec3::new(100.0, -160.0, 0.0);

        // Default 60° vfov: one scene unit per CSS pixel on the z = 0 plane
        let p = project_to_canvas(button, viewport, PI / 3.0).unwrap();
        assert!((p - Vec2::new(500.0, 460.0)).length() < 1e-2);

        // A wider vfov shrinks the plane towards the canvas center
        let wide = project_to_canvas(button, viewport, PI / 2.0).unwrap();
        let expected = Vec2::new(400.0, 300.0) + Vec2::new(100.0, 160.0) * (PI / 6.0).tan();
        assert!((wide - expected).length() < 1e-2);

        assert!(project_to_canvas(Vec3::new(0.0, 0.0, 1000.0), viewport, PI / 3.0).is_none());
    }

    #[test]
    fn test_eye_masks_split_channels() {
        let left = Eye::Left.write_mask();
        let right = Eye::Right.write_mask();
        assert!(left.intersection(right).is_empty());
        assert_eq!(left | right | wgpu::ColorWrites::ALPHA, wgpu::ColorWrites::ALL);
    }
}
