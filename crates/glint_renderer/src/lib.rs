//! glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for small analytic scenes: spheres and planes
//! with diffuse, metal and glass materials, lit by the background.
//!
//! The image is split into disjoint tiles rendered in parallel with rayon;
//! see [`render`] for the entry point.

mod camera;
mod error;
mod hittable;
mod renderer;
mod scatter;
pub mod tile;

pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, EPSILON};
pub use renderer::{
    background_color, color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, render_scene,
    validate_config, ImageBuffer,
};
pub use scatter::{reflect, refract, schlick, Scatter, ScatterResult};
pub use tile::{Tile, TileView};

/// Re-export the scene description and math types used in the public API
pub use glint_core::{Background, CameraSettings, Material, RenderConfig, Scene, Shape, TileLayout};
pub use glint_math::{Color, Interval, Ray, Vec3};
