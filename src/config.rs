//! Demo configuration.
//!
//! Both demo variants share one [`DemoConfig`]; they differ only in pixel density,
//! light intensity, surface roughness and whether the startup animation is chained.

use clap::{Parser, ValueEnum};

use crate::{
    color::Color,
    tween::{Easing, Sequencing, DEFAULT_DURATION},
};

/// A lit sphere that scales in, orbits and recolors while dragging.
#[derive(Parser, Debug)]
#[command(name = "orbit_sphere", version, about)]
pub struct Args {
    /// Configuration preset.
    #[arg(short, long, value_enum, default_value_t = Variant::Timeline)]
    pub variant: Variant,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Orbit speed override; 1.0 is one orbit per minute.
    #[arg(long)]
    pub auto_rotate_speed: Option<f32>,

    /// Disable automatic camera rotation.
    #[arg(long)]
    pub no_auto_rotate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Single sample, plain material, concurrent startup animation.
    Basic,
    /// Multisampled, rough material, chained startup animation.
    Timeline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SphereConfig {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub color: Color,
    pub roughness: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightConfig {
    pub position: glam::Vec3,
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub eye: glam::Vec3,
    pub target: glam::Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    pub sequencing: Sequencing,
    pub duration: f32,
    pub easing: Easing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecolorConfig {
    pub blue_channel: i32,
    pub duration: f32,
    pub easing: Easing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub sphere: SphereConfig,
    pub light: LightConfig,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub startup: StartupConfig,
    pub recolor: RecolorConfig,
    pub pixel_ratio: u32,
    pub clear_color: Color,
}

impl DemoConfig {
    pub fn for_variant(variant: Variant) -> Self {
        let (pixel_ratio, intensity, roughness, sequencing) = match variant {
            Variant::Basic => (1, 1.0, 1.0, Sequencing::Concurrent),
            Variant::Timeline => (2, 1.25, 0.5, Sequencing::Chained),
        };

        Self {
            window: WindowConfig {
                title: "orbit-sphere".to_owned(),
                width: 1280,
                height: 720,
            },
            sphere: SphereConfig {
                radius: 3.0,
                width_segments: 64,
                height_segments: 64,
                color: Color::from_u32(0x00FF83),
                roughness,
            },
            light: LightConfig {
                position: glam::Vec3::new(0.0, 10.0, 10.0),
                color: Color::WHITE,
                intensity,
                distance: 100.0,
            },
            camera: CameraConfig {
                fov_y_degrees: 45.0,
                z_near: 0.1,
                z_far: 100.0,
                eye: glam::Vec3::new(0.0, 0.0, 20.0),
                target: glam::Vec3::ZERO,
            },
            orbit: OrbitConfig {
                enable_damping: true,
                damping_factor: 0.05,
                enable_pan: false,
                enable_zoom: false,
                auto_rotate: true,
                auto_rotate_speed: 5.0,
                rotate_speed: 1.0,
                min_distance: 5.0,
                max_distance: 60.0,
            },
            startup: StartupConfig {
                sequencing,
                duration: DEFAULT_DURATION,
                easing: Easing::Power1Out,
            },
            recolor: RecolorConfig {
                blue_channel: 150,
                duration: DEFAULT_DURATION,
                easing: Easing::Power1Out,
            },
            pixel_ratio,
            clear_color: Color::BLACK,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        let mut config = Self::for_variant(args.variant);
        config.window.width = args.width.max(1);
        config.window.height = args.height.max(1);
        if let Some(speed) = args.auto_rotate_speed {
            config.orbit.auto_rotate_speed = speed;
        }
        if args.no_auto_rotate {
            config.orbit.auto_rotate = false;
        }
        config
    }

    /// Multisample count used for the pixel ratio: the sample density grows with its square.
    pub fn sample_count(&self) -> u32 {
        if self.pixel_ratio >= 2 {
            4
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_differ_only_in_presentation() {
        let basic = DemoConfig::for_variant(Variant::Basic);
        let timeline = DemoConfig::for_variant(Variant::Timeline);

        assert_eq!(basic.sample_count(), 1);
        assert_eq!(timeline.sample_count(), 4);
        assert_eq!(basic.light.intensity, 1.0);
        assert_eq!(timeline.light.intensity, 1.25);
        assert_eq!(basic.startup.sequencing, Sequencing::Concurrent);
        assert_eq!(timeline.startup.sequencing, Sequencing::Chained);

        assert_eq!(basic.sphere.radius, timeline.sphere.radius);
        assert_eq!(basic.camera, timeline.camera);
        assert_eq!(basic.orbit, timeline.orbit);
        assert_eq!(basic.recolor, timeline.recolor);
    }

    #[test]
    fn orbit_defaults() {
        let orbit = DemoConfig::for_variant(Variant::Timeline).orbit;
        assert!(orbit.enable_damping);
        assert!(!orbit.enable_pan);
        assert!(!orbit.enable_zoom);
        assert!(orbit.auto_rotate);
        assert_eq!(orbit.auto_rotate_speed, 5.0);
    }

    #[test]
    fn parse_defaults() {
        let args = Args::parse_from(["orbit_sphere"]);
        assert_eq!(args.variant, Variant::Timeline);
        let config = DemoConfig::from_args(&args);
        assert_eq!(config, DemoConfig::for_variant(Variant::Timeline));
    }

    #[test]
    fn parse_overrides() {
        let args = Args::parse_from([
            "orbit_sphere",
            "--variant",
            "basic",
            "--width",
            "640",
            "--height",
            "480",
            "--auto-rotate-speed",
            "2.5",
            "--no-auto-rotate",
        ]);
        let config = DemoConfig::from_args(&args);
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 480);
        assert_eq!(config.orbit.auto_rotate_speed, 2.5);
        assert!(!config.orbit.auto_rotate);
        assert_eq!(config.sample_count(), 1);
    }
}
