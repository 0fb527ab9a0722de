//! glint Core - Scene description for the glint path tracer.
//!
//! This crate provides:
//!
//! - **Scene data model**: `Material`, `Sphere`, `Plane`, `Shape`, `Scene`
//! - **Settings**: `CameraSettings`, `RenderConfig`, `Background`, `TileLayout`
//! - **Scene files**: JSON loading and validation via `load_scene`
//!
//! Everything here is plain immutable data. Intersection and scattering
//! live in `glint_renderer`.
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let file = load_scene("scenes/demo.json")?;
//! let (scene, camera, config) = file.into_parts()?;
//! println!("Loaded {} shapes", scene.len());
//! ```

pub mod loader;
pub mod material;
pub mod scene;
pub mod settings;
pub mod shape;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, SceneError, SceneFile, SceneResult};
pub use material::Material;
pub use scene::Scene;
pub use settings::{Background, CameraSettings, RenderConfig, TileLayout};
pub use shape::{Plane, Shape, Sphere};

pub use glint_math::{Color, Vec3};
