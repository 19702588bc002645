use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

use crate::{
    camera::{Camera, OrbitController},
    color::Color,
    config::{DemoConfig, RecolorConfig},
    interaction::DragRecolor,
    scene::Scene,
    tween::{Timeline, Tween},
};

/// Viewport dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizes {
    pub width: u32,
    pub height: u32,
}

/// All mutable demo state, driven by input handlers and the per-frame update.
#[derive(Debug)]
pub struct State {
    sizes: Sizes,
    pub camera: Camera,
    orbit: OrbitController,
    pub scene: Scene,
    timeline: Timeline,
    recolor: DragRecolor,
    recolor_config: RecolorConfig,
    color_tween: Option<Tween<Color>>,
}

impl State {
    pub fn new(config: &DemoConfig, width: u32, height: u32) -> Self {
        let sizes = Sizes {
            width: width.max(1),
            height: height.max(1),
        };
        let camera = Camera::new(&config.camera, sizes.width as f32 / sizes.height as f32);
        let orbit = OrbitController::new(&config.orbit, &camera);
        let mut scene = Scene::new(config);

        let mut timeline = Timeline::startup(&config.startup);
        timeline.restart(&mut scene);

        Self {
            sizes,
            camera,
            orbit,
            scene,
            timeline,
            recolor: DragRecolor::new(config.recolor.blue_channel),
            recolor_config: config.recolor.clone(),
            color_tween: None,
        }
    }

    pub fn sizes(&self) -> Sizes {
        self.sizes
    }

    /// Stores the new viewport size and matches the camera to it.
    ///
    /// Returns `false` without changing anything for an empty or unchanged size.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let sizes = Sizes { width, height };
        if width == 0 || height == 0 || sizes == self.sizes {
            return false;
        }
        self.sizes = sizes;
        self.camera.set_viewport(width, height);
        tracing::info!(width, height, "viewport resized");
        true
    }

    /// Translates a window event into state changes. Returns whether it was consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(position.x, position.y);
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                match state {
                    ElementState::Pressed => self.pointer_pressed(*button),
                    ElementState::Released => self.pointer_released(*button),
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => (position.y / 100.0) as f32,
                };
                self.orbit.zoom(steps);
                true
            }
            _ => false,
        }
    }

    pub fn pointer_pressed(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => {
                self.recolor.press();
                self.orbit.begin_rotate();
            }
            MouseButton::Right => self.orbit.begin_pan(),
            _ => {}
        }
    }

    pub fn pointer_released(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => {
                self.recolor.release();
                self.orbit.end_drag();
            }
            MouseButton::Right => self.orbit.end_drag(),
            _ => {}
        }
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.orbit
            .pointer_moved(glam::Vec2::new(x as f32, y as f32), self.sizes.height);

        let Some(channels) = self
            .recolor
            .pointer_moved(x, y, self.sizes.width, self.sizes.height)
        else {
            return;
        };

        match Color::try_from_channels(channels) {
            Ok(target) => {
                tracing::debug!(?channels, "recolor target");
                self.color_tween = Some(
                    Tween::new(self.scene.sphere.material.color, target)
                        .with_duration(self.recolor_config.duration)
                        .with_easing(self.recolor_config.easing),
                );
            }
            Err(e) => tracing::warn!("pointer color rejected: {}", e),
        }
    }

    /// Color the sphere is currently moving toward, if any.
    pub fn color_target(&self) -> Option<Color> {
        self.color_tween.as_ref().map(Tween::target)
    }

    pub fn update(&mut self, dt: f32) {
        self.orbit.update(&mut self.camera, dt);

        if !self.timeline.is_finished() {
            self.timeline.advance(dt, &mut self.scene);
        }

        if let Some(tween) = self.color_tween.as_mut() {
            self.scene.sphere.material.color = tween.advance(dt);
            if tween.is_finished() {
                self.color_tween = None;
            }
        }
    }
}
