use crate::{color::Color, config::DemoConfig, geometry::SphereGeometry};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub roughness: f32,
}

#[derive(Debug)]
pub struct Mesh {
    pub geometry: SphereGeometry,
    pub material: Material,
    pub scale: glam::Vec3,
}

impl Mesh {
    pub fn model_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_scale(self.scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: glam::Vec3,
    pub color: Color,
    pub intensity: f32,
    /// Range after which the light contributes nothing.
    pub distance: f32,
}

/// Screen-space panels drawn over the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    /// Vertical offset of the nav bar in units of its own height; `-1.0` is fully hidden.
    pub nav_offset: f32,
    pub title_opacity: f32,
}

#[derive(Debug)]
pub struct Scene {
    pub sphere: Mesh,
    pub light: PointLight,
    pub overlay: Overlay,
}

impl Scene {
    pub fn new(config: &DemoConfig) -> Self {
        let sphere = Mesh {
            geometry: SphereGeometry::new(
                config.sphere.radius,
                config.sphere.width_segments,
                config.sphere.height_segments,
            ),
            material: Material {
                color: config.sphere.color,
                roughness: config.sphere.roughness,
            },
            scale: glam::Vec3::ONE,
        };

        let light = PointLight {
            position: config.light.position,
            color: config.light.color,
            intensity: config.light.intensity,
            distance: config.light.distance,
        };

        Self {
            sphere,
            light,
            overlay: Overlay {
                nav_offset: 0.0,
                title_opacity: 1.0,
            },
        }
    }
}
