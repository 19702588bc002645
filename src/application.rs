use std::{process::Termination, time::Instant};

use wgpu::SurfaceError;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::*,
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::{Window, WindowBuilder},
};

use crate::{
    config::WindowConfig,
    error::ScreenError,
    render_loop::{FrameTick, RenderLoop, StopHandle},
};

#[derive(Debug)]
pub struct AppState {
    render_loop: RenderLoop,
    tick: FrameTick,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            render_loop: RenderLoop::new(),
            tick: FrameTick {
                frame: 0,
                delta: Default::default(),
            },
        }
    }

    /// Advances to the next frame. Returns `false` once the render loop was stopped.
    pub fn update(&mut self) -> bool {
        match self.render_loop.tick(Instant::now()) {
            Some(tick) => {
                self.tick = tick;
                true
            }
            None => false,
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.render_loop.stop_handle()
    }

    /// Seconds since the previous frame.
    pub fn delta_secs(&self) -> f32 {
        self.tick.delta_secs()
    }

    pub fn frame(&self) -> u64 {
        self.tick.frame
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Application<L: Layer + 'static> {
    layer: Option<L>,
    config: L::Config,
    screen: Screen,
    state: AppState,
}

impl<L: Layer + 'static> Application<L> {
    pub fn new(screen: Screen, config: L::Config) -> Self {
        Self {
            screen,
            config,
            layer: None,
            state: AppState::new(),
        }
    }

    fn run(
        &mut self,
        event: Event<()>,
        _event_loop: &EventLoopWindowTarget<()>,
        control_flow: &mut ControlFlow,
    ) {
        control_flow.set_poll();

        if let Some(layer) = self.layer.as_mut() {
            layer.process_event(&event, &mut self.screen);
        }

        match event {
            Event::NewEvents(StartCause::Init) => {
                self.layer = Some(L::start(&self.config, &mut self.screen, &self.state));
                self.screen.window().request_redraw();
            }
            Event::WindowEvent {
                window_id,
                ref event,
            } if self.screen.window().id() == window_id => match event {
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            ..
                        },
                    ..
                } => {
                    tracing::info!("stop requested");
                    self.state.stop_handle().stop();
                }
                WindowEvent::Resized(physical_size) => self.resize(*physical_size),
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    self.resize(**new_inner_size)
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                if self.state.update() {
                    self.screen.window().request_redraw();
                } else {
                    self.shutdown(control_flow);
                }
            }
            Event::RedrawRequested(window_id) if self.screen.window().id() == window_id => {
                let Some(layer) = self.layer.as_mut() else {
                    return;
                };
                layer.update(&self.state, &mut self.screen);

                match layer.render(&self.state, &mut self.screen) {
                    Ok(_) => {}
                    Err(SurfaceError::Lost) => self.screen.resize_to_current(),
                    Err(SurfaceError::OutOfMemory) => control_flow.set_exit_with_code(137),
                    Err(e) => tracing::error!("{:?}", e),
                }
            }
            _ => {}
        }
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.screen.resize(new_size);
        if let Some(layer) = self.layer.as_mut() {
            layer.resize(new_size, &self.state, &mut self.screen);
        }
    }

    fn shutdown(&mut self, control_flow: &mut ControlFlow) {
        control_flow.set_exit_with_code(0);
        if let Some(mut layer) = self.layer.take() {
            if let Err(e) = layer.shutdown(&self.state, &mut self.screen) {
                tracing::error!(error = ?e, "layer shutdown failed");
                control_flow.set_exit_with_code(1);
            }
        }
    }

    pub async fn init(window_config: &WindowConfig, config: L::Config) -> Result<(), ScreenError> {
        let event_loop = EventLoop::new();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let screen = Screen::new(&event_loop, &instance, window_config).await?;
        let mut application = Self::new(screen, config);
        event_loop.run(move |event, event_loop, control_flow| {
            application.run(event, event_loop, control_flow);
        });
    }
}

pub struct Screen {
    pub surface: wgpu::Surface,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    adapter: wgpu::Adapter,
    window: Window,
}

impl Screen {
    pub async fn new(
        event_loop: &EventLoopWindowTarget<()>,
        instance: &wgpu::Instance,
        window_config: &WindowConfig,
    ) -> Result<Self, ScreenError> {
        let window = WindowBuilder::new()
            .with_title(window_config.title.as_str())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height))
            .build(event_loop)?;

        // SAFETY:
        // The surface needs to live as long as the window that created it.
        // Screen owns the window so this should be safe.
        let surface = unsafe { instance.create_surface(&window) }?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ScreenError::NoSuitableAdapter)?;
        let info = adapter.get_info();
        tracing::info!(name = %info.name, backend = ?info.backend, "adapter selected");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: adapter.features(),
                    limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await?;
        let size = window.inner_size();
        let config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or(ScreenError::UnsupportedSurface)?;
        surface.configure(&device, &config);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            adapter,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    /// `requested` if the surface format can be multisampled with it, 1 otherwise.
    pub fn supported_sample_count(&self, requested: u32) -> u32 {
        let features = self.adapter.get_texture_format_features(self.config.format);
        if features.flags.sample_count_supported(requested) {
            requested
        } else {
            tracing::warn!(requested, "sample count unsupported, rendering without multisampling");
            1
        }
    }

    /// Resize the screen to new window size. Empty and unchanged sizes are skipped.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) -> bool {
        if new_size.width == 0 || new_size.height == 0 || new_size == self.size() {
            return false;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        true
    }

    /// Reconfigure the surface with the current window inner size.
    pub fn resize_to_current(&mut self) {
        let size = self.window.inner_size();
        if size.width > 0 && size.height > 0 {
            self.config.width = size.width;
            self.config.height = size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }
}

pub trait Layer: Sized {
    type Config: 'static;
    type LayerErr: Termination + std::fmt::Debug + 'static;

    fn start(config: &Self::Config, screen: &mut Screen, app: &AppState) -> Self;
    fn process_event(&mut self, event: &Event<()>, screen: &mut Screen);
    fn resize(&mut self, new_size: PhysicalSize<u32>, app: &AppState, screen: &mut Screen);
    fn update(&mut self, app: &AppState, screen: &mut Screen);
    fn render(&mut self, app: &AppState, screen: &mut Screen) -> Result<(), SurfaceError>;
    fn shutdown(&mut self, app: &AppState, screen: &mut Screen) -> Result<(), Self::LayerErr>;
}
