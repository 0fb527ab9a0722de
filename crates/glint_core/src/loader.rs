//! JSON scene files.
//!
//! A scene file bundles the shape list with the camera and render settings:
//!
//! ```json
//! {
//!   "camera": { "position": [0, 0, 0], "target": [0, 0, 1], "fov": 90 },
//!   "render": { "width": 640, "height": 360, "samples_per_pixel": 16 },
//!   "shapes": [
//!     { "type": "sphere", "center": [0, 0, 3], "radius": 1,
//!       "material": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] } }
//!   ]
//! }
//! ```

use std::path::Path;

use glint_math::{Color, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CameraSettings, Material, Plane, RenderConfig, Scene, Shape, Sphere};

/// Errors that can occur while loading a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid shape #{index}: {reason}")]
    InvalidShape { index: usize, reason: String },

    #[error("Invalid material on shape #{index}: {reason}")]
    InvalidMaterial { index: usize, reason: String },
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// Everything needed to render one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl SceneFile {
    /// The built-in scene: four spheres of mixed materials above a ground plane.
    pub fn demo() -> Self {
        let shapes: Vec<Shape> = vec![
            Sphere::new(
                Vec3::new(1.0, 1.0, 3.0),
                0.5,
                Material::metal(Color::new(1.0, 0.0, 0.0), 0.3),
            )
            .into(),
            Plane::new(Vec3::Y, -1.0, Material::lambertian(Color::new(0.2, 0.2, 0.8))).into(),
            Sphere::new(
                Vec3::new(0.0, -1.0, 2.0),
                0.5,
                Material::lambertian(Color::new(0.0, 1.0, 0.0)),
            )
            .into(),
            Sphere::new(
                Vec3::new(-3.0, 2.0, 2.0),
                0.5,
                Material::metal(Color::new(1.0, 1.0, 0.0), 0.0),
            )
            .into(),
            Sphere::new(Vec3::new(0.0, 1.0, 2.0), 0.5, Material::dielectric(1.5)).into(),
        ];

        Self {
            camera: CameraSettings::default(),
            render: RenderConfig::default(),
            shapes,
        }
    }

    /// Validate every shape and split into the renderer's inputs.
    pub fn into_parts(mut self) -> SceneResult<(Scene, CameraSettings, RenderConfig)> {
        for (index, shape) in self.shapes.iter_mut().enumerate() {
            shape
                .validate()
                .map_err(|reason| SceneError::InvalidShape { index, reason })?;
            shape
                .material()
                .validate()
                .map_err(|reason| SceneError::InvalidMaterial { index, reason })?;
        }

        if self.shapes.is_empty() {
            log::warn!("Scene has no shapes; every pixel will be background");
        }

        Ok((Scene::from_shapes(self.shapes), self.camera, self.render))
    }
}

/// Load a scene file from disk.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneFile> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let file = load_scene_from_str(&text)?;
    log::info!("Loaded {} shapes from {}", file.shapes.len(), path.display());
    Ok(file)
}

/// Parse a scene file from a JSON string.
pub fn load_scene_from_str(text: &str) -> SceneResult<SceneFile> {
    Ok(serde_json::from_str(text)?)
}
