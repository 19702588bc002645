use clap::Parser;
use orbit_sphere_lib::{
    application::{AppState, Application, Layer, Screen},
    config::{Args, DemoConfig},
    renderer::{
        FrameTargets, IndexBuffer, OverlayUniform, QuadVertex, SceneUniform, UniformBuffer,
        Vertex, VertexBuffer, QUAD_INDICES, QUAD_VERTICES,
    },
    state::State,
};
use tracing_subscriber::EnvFilter;
use wgpu::{
    include_wgsl, CommandEncoderDescriptor, PipelineLayoutDescriptor, RenderPassColorAttachment,
    RenderPassDepthStencilAttachment, RenderPassDescriptor, RenderPipelineDescriptor,
    TextureViewDescriptor,
};
use winit::{dpi::PhysicalSize, event::Event};

struct SphereDemo {
    state: State,
    scene_uniform: UniformBuffer<SceneUniform>,
    overlay_uniform: UniformBuffer<OverlayUniform>,
    sphere_pipeline: wgpu::RenderPipeline,
    overlay_pipeline: wgpu::RenderPipeline,
    sphere_vertices: VertexBuffer,
    sphere_indices: IndexBuffer,
    quad_vertices: VertexBuffer,
    quad_indices: IndexBuffer,
    targets: FrameTargets,
    clear_color: wgpu::Color,
}

struct PipelineDesc<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    bind_group_layout: &'a wgpu::BindGroupLayout,
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    blend: wgpu::BlendState,
    cull_mode: Option<wgpu::Face>,
    depth_write_enabled: bool,
    depth_compare: wgpu::CompareFunction,
}

fn create_pipeline(screen: &Screen, sample_count: u32, desc: PipelineDesc) -> wgpu::RenderPipeline {
    let layout = screen
        .device
        .create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some(desc.label),
            bind_group_layouts: &[desc.bind_group_layout],
            push_constant_ranges: &[],
        });

    screen
        .device
        .create_render_pipeline(&RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: desc.shader,
                entry_point: "vs_main",
                buffers: &[desc.vertex_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: desc.shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: screen.config.format,
                    blend: Some(desc.blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: desc.cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: FrameTargets::DEPTH_FORMAT,
                depth_write_enabled: desc.depth_write_enabled,
                depth_compare: desc.depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        })
}

impl Layer for SphereDemo {
    type Config = DemoConfig;
    type LayerErr = ();

    fn start(config: &DemoConfig, screen: &mut Screen, _app: &AppState) -> Self {
        let size = screen.size();
        let state = State::new(config, size.width, size.height);

        let sample_count = screen.supported_sample_count(config.sample_count());
        let targets = FrameTargets::new(&screen.device, &screen.config, sample_count);
        tracing::info!(
            width = size.width,
            height = size.height,
            sample_count,
            "renderer ready"
        );

        let geometry = &state.scene.sphere.geometry;
        let sphere_vertices = VertexBuffer::init_immediate(
            &screen.device,
            bytemuck::cast_slice(geometry.vertices()),
            Some("Sphere Vertex Buffer"),
        );
        let sphere_indices = IndexBuffer::init_immediate_u32(
            &screen.device,
            geometry.indices(),
            Some("Sphere Index Buffer"),
        );
        let quad_vertices = VertexBuffer::init_immediate(
            &screen.device,
            bytemuck::cast_slice(QUAD_VERTICES),
            Some("Quad Vertex Buffer"),
        );
        let quad_indices =
            IndexBuffer::init_immediate_u16(&screen.device, QUAD_INDICES, Some("Quad Index Buffer"));

        let scene_uniform = UniformBuffer::init_immediate(
            &screen.device,
            &SceneUniform::new(&state.camera, &state.scene),
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            Some("Scene Uniform"),
        );
        let overlay_uniform = UniformBuffer::init_immediate(
            &screen.device,
            &OverlayUniform::new(&state.scene),
            wgpu::ShaderStages::VERTEX,
            Some("Overlay Uniform"),
        );

        let sphere_shader = screen
            .device
            .create_shader_module(include_wgsl!("asset/shader/sphere.wgsl"));
        let overlay_shader = screen
            .device
            .create_shader_module(include_wgsl!("asset/shader/overlay.wgsl"));

        let sphere_pipeline = create_pipeline(
            screen,
            sample_count,
            PipelineDesc {
                label: "Sphere Pipeline",
                shader: &sphere_shader,
                bind_group_layout: scene_uniform.layout(),
                vertex_layout: Vertex::layout(),
                blend: wgpu::BlendState::REPLACE,
                cull_mode: Some(wgpu::Face::Back),
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );
        let overlay_pipeline = create_pipeline(
            screen,
            sample_count,
            PipelineDesc {
                label: "Overlay Pipeline",
                shader: &overlay_shader,
                bind_group_layout: overlay_uniform.layout(),
                vertex_layout: QuadVertex::layout(),
                blend: wgpu::BlendState::ALPHA_BLENDING,
                cull_mode: None,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
            },
        );

        let clear = config.clear_color.to_linear().as_dvec3();
        let clear_color = wgpu::Color {
            r: clear.x,
            g: clear.y,
            b: clear.z,
            a: 1.0,
        };

        Self {
            state,
            scene_uniform,
            overlay_uniform,
            sphere_pipeline,
            overlay_pipeline,
            sphere_vertices,
            sphere_indices,
            quad_vertices,
            quad_indices,
            targets,
            clear_color,
        }
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>, _app: &AppState, screen: &mut Screen) {
        if self.state.resize(new_size.width, new_size.height) {
            self.targets =
                FrameTargets::new(&screen.device, &screen.config, self.targets.sample_count());
        }
    }

    fn process_event(&mut self, event: &Event<()>, _screen: &mut Screen) {
        if let Event::WindowEvent { event, .. } = event {
            self.state.handle_window_event(event);
        }
    }

    fn update(&mut self, app: &AppState, screen: &mut Screen) {
        self.state.update(app.delta_secs());
        self.scene_uniform.write(
            &screen.queue,
            &SceneUniform::new(&self.state.camera, &self.state.scene),
        );
        self.overlay_uniform
            .write(&screen.queue, &OverlayUniform::new(&self.state.scene));
    }

    fn render(&mut self, _app: &AppState, screen: &mut Screen) -> Result<(), wgpu::SurfaceError> {
        let output = screen.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&TextureViewDescriptor::default());
        let (attachment, resolve_target) = self.targets.color_views(&view);
        let mut encoder = screen
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: attachment,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: true,
                    },
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: self.targets.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: false,
                    }),
                    stencil_ops: None,
                }),
            });

            render_pass.set_pipeline(&self.sphere_pipeline);
            render_pass.set_bind_group(0, self.scene_uniform.bind_group(), &[]);
            render_pass.set_vertex_buffer(0, self.sphere_vertices.buffer().slice(..));
            render_pass.set_index_buffer(
                self.sphere_indices.buffer().slice(..),
                self.sphere_indices.format(),
            );
            render_pass.draw_indexed(0..self.sphere_indices.count(), 0, 0..1);

            render_pass.set_pipeline(&self.overlay_pipeline);
            render_pass.set_bind_group(0, self.overlay_uniform.bind_group(), &[]);
            render_pass.set_vertex_buffer(0, self.quad_vertices.buffer().slice(..));
            render_pass.set_index_buffer(
                self.quad_indices.buffer().slice(..),
                self.quad_indices.format(),
            );
            // Nav bar and title panel.
            render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..2);
        }

        screen.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn shutdown(&mut self, app: &AppState, _screen: &mut Screen) -> Result<(), Self::LayerErr> {
        tracing::info!(frames = app.frame(), "exiting");
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orbit_sphere=info,orbit_sphere_lib=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = DemoConfig::from_args(&args);
    tracing::info!(variant = ?args.variant, "starting");

    let window = config.window.clone();
    if let Err(e) = pollster::block_on(Application::<SphereDemo>::init(&window, config)) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
