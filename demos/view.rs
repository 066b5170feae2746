#![allow(irrefutable_let_patterns)]

use blade_graphics as gpu;
use d20_spin as d20;

const WINDOW_SIZE: u32 = 600;

const CAMERA_HALF_HEIGHT: f32 = 2.0;
const CAMERA_EYE: glam::Vec3 = glam::Vec3::new(20.0, 20.0, 20.0);
const CAMERA_NEAR: f32 = 1.0;
const CAMERA_FAR: f32 = 1000.0;

const LIGHT_POSITION: [f32; 3] = [-20.0, 20.0, 30.0];
const LIGHT_INTENSITY: f32 = 1.4;
const AMBIENT: [f32; 3] = [0.8, 0.8, 0.8];

const INITIAL_ROTATION: [f32; 3] = [0.5, 3.0, -0.5];
const SPIN_RATE: f32 = 0.015;

/// Cumulative rotation of the die, advanced once per redraw.
struct Spin {
    rotation: glam::Vec3,
}

impl Spin {
    fn new() -> Self {
        Self {
            rotation: glam::Vec3::from_array(INITIAL_ROTATION),
        }
    }

    fn advance(&mut self) {
        self.rotation.x += SPIN_RATE;
        self.rotation.y += SPIN_RATE;
    }

    fn model_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    fn view_projection_matrix(aspect: f32) -> glam::Mat4 {
        let half_width = CAMERA_HALF_HEIGHT * aspect;
        let projection = glam::Mat4::orthographic_rh(
            -half_width,
            half_width,
            -CAMERA_HALF_HEIGHT,
            CAMERA_HALF_HEIGHT,
            CAMERA_NEAR,
            CAMERA_FAR,
        );
        let view = glam::Mat4::look_at_rh(CAMERA_EYE, glam::Vec3::ZERO, glam::Vec3::Y);
        projection * view
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
struct Parameters {
    mvp: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    light_position: [f32; 3],
    light_intensity: f32,
    ambient: [f32; 3],
    pad: f32,
}

#[derive(blade_macros::ShaderData)]
struct DrawData {
    g_parameters: Parameters,
    g_vertices: gpu::BufferPiece,
    g_edges: gpu::BufferPiece,
    g_atlas: gpu::TextureView,
    g_sampler: gpu::Sampler,
}

struct Example {
    spin: Spin,
    face_pipeline: gpu::RenderPipeline,
    edge_pipeline: gpu::RenderPipeline,
    command_encoder: gpu::CommandEncoder,
    prev_sync_point: Option<gpu::SyncPoint>,
    window_size: winit::dpi::PhysicalSize<u32>,
    depth_texture: gpu::Texture,
    depth_view: gpu::TextureView,
    die: d20::Die,
    surface: gpu::Surface,
    context: gpu::Context,
}

impl Example {
    fn make_surface_config(size: winit::dpi::PhysicalSize<u32>) -> gpu::SurfaceConfig {
        log::info!("Window size: {:?}", size);
        gpu::SurfaceConfig {
            size: gpu::Extent {
                width: size.width,
                height: size.height,
                depth: 1,
            },
            usage: gpu::TextureUsage::TARGET,
            display_sync: gpu::DisplaySync::Recent,
            ..Default::default()
        }
    }

    fn make_depth(
        context: &gpu::Context,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> (gpu::Texture, gpu::TextureView) {
        let texture = context.create_texture(gpu::TextureDesc {
            name: "depth",
            format: gpu::TextureFormat::Depth32Float,
            size: gpu::Extent {
                width: size.width.max(1),
                height: size.height.max(1),
                depth: 1,
            },
            array_layer_count: 1,
            mip_level_count: 1,
            dimension: gpu::TextureDimension::D2,
            usage: gpu::TextureUsage::TARGET,
            sample_count: 1,
        });
        let view = context.create_texture_view(
            texture,
            gpu::TextureViewDesc {
                name: "depth",
                format: gpu::TextureFormat::Depth32Float,
                dimension: gpu::ViewDimension::D2,
                subresources: &gpu::TextureSubresources::default(),
            },
        );
        (texture, view)
    }

    fn init(window: &winit::window::Window) -> Self {
        let context = unsafe {
            gpu::Context::init(gpu::ContextDesc {
                presentation: true,
                validation: cfg!(debug_assertions),
                timing: false,
                capture: false,
                overlay: true,
                device_id: 0,
            })
            .unwrap()
        };
        let window_size = window.inner_size();

        let surface = context
            .create_surface_configured(window, Self::make_surface_config(window_size))
            .unwrap();
        let info = surface.info();

        let shader = {
            let source = std::fs::read_to_string("demos/shader.wgsl").unwrap();
            context.create_shader(gpu::ShaderDesc { source: &source })
        };
        let draw_layout = <DrawData as gpu::ShaderData>::layout();
        let depth_state = gpu::DepthStencilState {
            format: gpu::TextureFormat::Depth32Float,
            depth_write_enabled: true,
            depth_compare: gpu::CompareFunction::LessEqual,
            stencil: gpu::StencilState::default(),
            bias: gpu::DepthBiasState::default(),
        };
        let face_pipeline = context.create_render_pipeline(gpu::RenderPipelineDesc {
            name: "faces",
            data_layouts: &[&draw_layout],
            primitive: gpu::PrimitiveState {
                topology: gpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            vertex: shader.at("vs_die"),
            vertex_fetches: &[],
            fragment: Some(shader.at("fs_die")),
            color_targets: &[info.format.into()],
            depth_stencil: Some(depth_state.clone()),
            multisample_state: Default::default(),
        });
        let edge_pipeline = context.create_render_pipeline(gpu::RenderPipelineDesc {
            name: "edges",
            data_layouts: &[&draw_layout],
            primitive: gpu::PrimitiveState {
                topology: gpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            vertex: shader.at("vs_edge"),
            vertex_fetches: &[],
            fragment: Some(shader.at("fs_edge")),
            color_targets: &[info.format.into()],
            depth_stencil: Some(depth_state),
            multisample_state: Default::default(),
        });

        let mut command_encoder = context.create_command_encoder(gpu::CommandEncoderDesc {
            name: "main",
            buffer_count: 2,
        });

        let shape = d20::Icosahedron::new();
        let atlas = d20::label::LabelAtlas::build();
        let mesh = d20::DieMesh::build(&shape, &atlas, &d20::BuildParameters::default());
        let die = d20::Die::new(&mesh, &atlas, &context, &mut command_encoder);

        let (depth_texture, depth_view) = Self::make_depth(&context, window_size);

        Self {
            spin: Spin::new(),
            face_pipeline,
            edge_pipeline,
            command_encoder,
            prev_sync_point: None,
            window_size,
            depth_texture,
            depth_view,
            die,
            surface,
            context,
        }
    }

    fn deinit(&mut self) {
        self.wait_for_gpu();
        self.context.destroy_render_pipeline(&mut self.face_pipeline);
        self.context.destroy_render_pipeline(&mut self.edge_pipeline);
        self.context
            .destroy_command_encoder(&mut self.command_encoder);
        self.context.destroy_texture_view(self.depth_view);
        self.context.destroy_texture(self.depth_texture);
        self.context.destroy_surface(&mut self.surface);
        self.die.deinit(&self.context);
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.window_size = size;
        let config = Self::make_surface_config(size);
        self.context.reconfigure_surface(&mut self.surface, config);
        self.wait_for_gpu();
        self.context.destroy_texture_view(self.depth_view);
        self.context.destroy_texture(self.depth_texture);
        let (depth_texture, depth_view) = Self::make_depth(&self.context, size);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;
    }

    fn wait_for_gpu(&mut self) {
        if let Some(sp) = self.prev_sync_point.take() {
            self.context.wait_for(&sp, !0);
        }
    }

    fn render(&mut self) {
        if self.window_size == Default::default() {
            return;
        }
        let frame = self.surface.acquire_frame();
        let aspect = self.window_size.width as f32 / self.window_size.height as f32;

        self.spin.advance();
        let model = self.spin.model_matrix();
        let parameters = Parameters {
            mvp: (Spin::view_projection_matrix(aspect) * model).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            light_position: LIGHT_POSITION,
            light_intensity: LIGHT_INTENSITY,
            ambient: AMBIENT,
            pad: 0.0,
        };
        let draw_data = DrawData {
            g_parameters: parameters,
            g_vertices: self.die.vertex_buf.at(0),
            g_edges: self.die.edge_buf.at(0),
            g_atlas: self.die.atlas_view,
            g_sampler: self.die.sampler,
        };

        self.command_encoder.start();
        self.command_encoder.init_texture(frame.texture());
        self.command_encoder.init_texture(self.depth_texture);

        if let mut pass = self.command_encoder.render(
            "main",
            gpu::RenderTargetSet {
                colors: &[gpu::RenderTarget {
                    view: frame.texture_view(),
                    init_op: gpu::InitOp::Clear(gpu::TextureColor::White),
                    finish_op: gpu::FinishOp::Store,
                }],
                depth_stencil: Some(gpu::RenderTarget {
                    view: self.depth_view,
                    init_op: gpu::InitOp::Clear(gpu::TextureColor::White),
                    finish_op: gpu::FinishOp::Discard,
                }),
            },
        ) {
            {
                let mut pen = pass.with(&self.face_pipeline);
                pen.bind(0, &draw_data);
                pen.draw(0, self.die.vertex_count, 0, 1);
            }
            {
                let mut pen = pass.with(&self.edge_pipeline);
                pen.bind(0, &draw_data);
                pen.draw(0, self.die.edge_vertex_count, 0, 1);
            }
        }
        self.command_encoder.present(frame);
        let sync_point = self.context.submit(&mut self.command_encoder);

        self.wait_for_gpu();
        self.prev_sync_point = Some(sync_point);
    }
}

fn main() {
    env_logger::init();

    let event_loop = winit::event_loop::EventLoop::new().unwrap();
    let window_attributes = winit::window::Window::default_attributes()
        .with_title("d20-spin")
        .with_inner_size(winit::dpi::PhysicalSize::new(WINDOW_SIZE, WINDOW_SIZE));
    let window = event_loop.create_window(window_attributes).unwrap();

    let mut example = Example::init(&window);

    event_loop
        .run(|event, target| {
            target.set_control_flow(winit::event_loop::ControlFlow::Poll);
            match event {
                winit::event::Event::AboutToWait => {
                    window.request_redraw();
                }
                winit::event::Event::WindowEvent { event, .. } => match event {
                    winit::event::WindowEvent::Resized(size) => {
                        example.resize(size);
                    }
                    winit::event::WindowEvent::KeyboardInput {
                        event:
                            winit::event::KeyEvent {
                                physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                                state: winit::event::ElementState::Pressed,
                                ..
                            },
                        ..
                    } => {
                        if key_code == winit::keyboard::KeyCode::Escape {
                            target.exit();
                        }
                    }
                    winit::event::WindowEvent::CloseRequested => {
                        target.exit();
                    }
                    winit::event::WindowEvent::RedrawRequested => {
                        example.render();
                    }
                    _ => {}
                },
                _ => {}
            }
        })
        .unwrap();

    example.deinit();
}
