use std::f32::consts::PI;

use crate::config::{CameraConfig, OrbitConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: glam::Vec3,
    pub target: glam::Vec3,
    pub up: glam::Vec3,
    pub aspect: f32,
    pub fov_y: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    #[rustfmt::skip]
    pub const OPENGL_TO_WGPU_MATRIX: glam::Mat4 = glam::Mat4::from_cols_array(&[
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.0,
        0.0, 0.0, 0.5, 1.0,
    ]);

    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            eye: config.eye,
            target: config.target,
            up: glam::Vec3::Y,
            aspect,
            fov_y: config.fov_y_degrees.to_radians(),
            z_near: config.z_near,
            z_far: config.z_far,
        }
    }

    /// Matches the aspect ratio to a viewport of `width` x `height` pixels.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn view_projection_matrix(&self) -> glam::Mat4 {
        let view = glam::Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = glam::Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.z_near, self.z_far);
        Self::OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

/// Spherical coordinates around the orbit target, y axis up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    const EPS: f32 = 0.000001;

    fn from_offset(offset: glam::Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> glam::Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        glam::Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    fn make_safe(&mut self) {
        self.phi = self.phi.clamp(Self::EPS, PI - Self::EPS);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    None,
    Rotate,
    Pan,
}

/// Orbits the camera around its target, with optional damping and auto-rotation.
#[derive(Debug, Clone)]
pub struct OrbitController {
    config: OrbitConfig,
    target: glam::Vec3,
    spherical_delta: Spherical,
    pan_delta: glam::Vec2,
    pan_offset: glam::Vec3,
    scale: f32,
    drag: Drag,
    last_pointer: Option<glam::Vec2>,
}

impl OrbitController {
    pub fn new(config: &OrbitConfig, camera: &Camera) -> Self {
        Self {
            config: config.clone(),
            target: camera.target,
            spherical_delta: Spherical::default(),
            pan_delta: glam::Vec2::ZERO,
            pan_offset: glam::Vec3::ZERO,
            scale: 1.0,
            drag: Drag::None,
            last_pointer: None,
        }
    }

    pub fn target(&self) -> glam::Vec3 {
        self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != Drag::None
    }

    pub fn begin_rotate(&mut self) {
        self.drag = Drag::Rotate;
    }

    pub fn begin_pan(&mut self) {
        if self.config.enable_pan {
            self.drag = Drag::Pan;
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = Drag::None;
    }

    /// Feeds a pointer position in pixels. Movement only has an effect while dragging.
    pub fn pointer_moved(&mut self, position: glam::Vec2, viewport_height: u32) {
        let previous = self.last_pointer.replace(position);
        let Some(previous) = previous else {
            return;
        };
        let height = viewport_height.max(1) as f32;
        let delta = position - previous;

        match self.drag {
            Drag::Rotate => {
                self.rotate_left(2.0 * PI * delta.x / height * self.config.rotate_speed);
                self.rotate_up(2.0 * PI * delta.y / height * self.config.rotate_speed);
            }
            Drag::Pan => self.pan_delta += delta / height,
            Drag::None => {}
        }
    }

    /// Zooms by wheel steps, positive toward the target.
    pub fn zoom(&mut self, steps: f32) {
        if self.config.enable_zoom {
            self.scale *= 0.95_f32.powf(steps);
        }
    }

    fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    fn auto_rotation_angle(&self, dt: f32) -> f32 {
        2.0 * PI / 60.0 * self.config.auto_rotate_speed * dt
    }

    /// Advances the orbit by `dt` seconds and writes the result into `camera`.
    pub fn update(&mut self, camera: &mut Camera, dt: f32) {
        let mut spherical = Spherical::from_offset(camera.eye - self.target);

        if self.config.auto_rotate && self.drag == Drag::None {
            self.rotate_left(self.auto_rotation_angle(dt));
        }

        if self.pan_delta != glam::Vec2::ZERO {
            self.resolve_pan(camera, spherical.radius);
        }

        let factor = if self.config.enable_damping {
            self.config.damping_factor
        } else {
            1.0
        };

        spherical.theta += self.spherical_delta.theta * factor;
        spherical.phi += self.spherical_delta.phi * factor;
        spherical.make_safe();

        if self.config.enable_zoom {
            spherical.radius = (spherical.radius * self.scale)
                .clamp(self.config.min_distance, self.config.max_distance);
        }

        self.target += self.pan_offset * factor;

        camera.target = self.target;
        camera.eye = self.target + spherical.to_offset();

        let decay = 1.0 - factor;
        self.spherical_delta.theta *= decay;
        self.spherical_delta.phi *= decay;
        self.pan_offset *= decay;
        self.scale = 1.0;
    }

    fn resolve_pan(&mut self, camera: &Camera, distance: f32) {
        let forward = (self.target - camera.eye).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);
        let target_distance = distance * (camera.fov_y / 2.0).tan();

        self.pan_offset += right * (-2.0 * self.pan_delta.x * target_distance);
        self.pan_offset += up * (2.0 * self.pan_delta.y * target_distance);
        self.pan_delta = glam::Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DemoConfig, Variant};

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (DemoConfig, Camera) {
        let config = DemoConfig::for_variant(Variant::Timeline);
        let camera = Camera::new(&config.camera, 16.0 / 9.0);
        (config, camera)
    }

    fn theta(camera: &Camera) -> f32 {
        let offset = camera.eye - camera.target;
        offset.x.atan2(offset.z)
    }

    fn wrapped(angle: f32) -> f32 {
        (angle + PI).rem_euclid(2.0 * PI) - PI
    }

    #[test]
    fn set_viewport_updates_aspect() {
        let (_, mut camera) = setup();
        camera.set_viewport(800, 600);
        assert_eq!(camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn auto_rotation_converges_to_configured_speed() {
        let (config, mut camera) = setup();
        let mut controller = OrbitController::new(&config.orbit, &camera);

        for _ in 0..600 {
            controller.update(&mut camera, DT);
        }
        let before = theta(&camera);
        controller.update(&mut camera, DT);
        let step = wrapped(theta(&camera) - before);

        let expected = -2.0 * PI / 60.0 * config.orbit.auto_rotate_speed * DT;
        assert!((step - expected).abs() < 1e-4, "{} vs {}", step, expected);
        assert!(((camera.eye - camera.target).length() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn auto_rotation_pauses_while_dragging() {
        let (config, mut camera) = setup();
        let mut controller = OrbitController::new(&config.orbit, &camera);
        controller.begin_rotate();
        let eye = camera.eye;
        controller.update(&mut camera, DT);
        assert!((camera.eye - eye).length() < 1e-4);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let (mut config, mut camera) = setup();
        config.orbit.enable_damping = false;
        config.orbit.auto_rotate = false;
        let mut controller = OrbitController::new(&config.orbit, &camera);

        controller.begin_rotate();
        controller.pointer_moved(glam::Vec2::new(0.0, 0.0), 600);
        controller.pointer_moved(glam::Vec2::new(0.0, 5000.0), 600);
        controller.update(&mut camera, DT);

        let offset = (camera.eye - camera.target).normalize();
        assert!(offset.y > 0.999);
        // Still on the near side of the pole.
        assert!(camera.eye.z > 0.0);
        assert!(camera.eye.is_finite());
    }

    #[test]
    fn zoom_ignored_when_disabled() {
        let (config, mut camera) = setup();
        let mut controller = OrbitController::new(&config.orbit, &camera);
        controller.zoom(10.0);
        controller.update(&mut camera, DT);
        assert!(((camera.eye - camera.target).length() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn zoom_moves_toward_target_when_enabled() {
        let (mut config, mut camera) = setup();
        config.orbit.enable_zoom = true;
        let mut controller = OrbitController::new(&config.orbit, &camera);
        controller.zoom(2.0);
        controller.update(&mut camera, DT);
        let distance = (camera.eye - camera.target).length();
        assert!((distance - 20.0 * 0.95 * 0.95).abs() < 1e-3);
    }

    #[test]
    fn pan_ignored_when_disabled() {
        let (config, mut camera) = setup();
        let mut controller = OrbitController::new(&config.orbit, &camera);
        controller.begin_pan();
        assert!(!controller.is_dragging());
        controller.pointer_moved(glam::Vec2::new(0.0, 0.0), 600);
        controller.pointer_moved(glam::Vec2::new(300.0, 0.0), 600);
        controller.update(&mut camera, DT);
        assert_eq!(controller.target(), glam::Vec3::ZERO);
    }

    #[test]
    fn pan_moves_target_when_enabled() {
        let (mut config, mut camera) = setup();
        config.orbit.enable_pan = true;
        config.orbit.enable_damping = false;
        config.orbit.auto_rotate = false;
        let mut controller = OrbitController::new(&config.orbit, &camera);
        controller.begin_pan();
        controller.pointer_moved(glam::Vec2::new(0.0, 0.0), 600);
        controller.pointer_moved(glam::Vec2::new(300.0, 0.0), 600);
        controller.update(&mut camera, DT);
        // Dragging right moves the scene right, so the target moves left.
        assert!(controller.target().x < 0.0);
        assert_eq!(camera.target, controller.target());
    }
}
