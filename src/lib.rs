pub mod application;
pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod render_loop;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod tween;
