//! Math primitives for glint.
//!
//! Vectors come straight from glam; this crate adds the ray, the accepted
//! parameter interval of an intersection query, and the random sampling
//! helpers shared by the camera and the materials.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
pub mod sampling;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{random_in_unit_ball, random_in_unit_square};

/// Linear RGB color. Channels are nominally in [0, 1] but are never clamped
/// before output.
pub type Color = Vec3;
