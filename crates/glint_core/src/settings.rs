//! Camera and render settings.
//!
//! All settings deserialize with defaults for missing fields, so a scene
//! file only needs to name what it changes.

use glint_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

/// Pinhole camera placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Horizontal field of view in degrees
    pub fov: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            target: Vec3::Z,
            up: Vec3::Y,
            fov: 90.0,
        }
    }
}

/// Radiance returned by rays that leave the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Background {
    /// The same color in every direction.
    Flat { color: Color },
    /// Blend from `horizon` (looking straight down) to `zenith` (straight up).
    Gradient { horizon: Color, zenith: Color },
}

impl Default for Background {
    fn default() -> Self {
        Background::Flat {
            color: Color::new(0.8, 0.8, 1.0),
        }
    }
}

/// How the image is partitioned into independently rendered tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TileLayout {
    /// A rows x cols grid with exactly `count` tiles, one worker each.
    Grid { count: u32 },
    /// Fixed-size square buckets, rendered from the image center outward.
    Buckets { size: u32 },
}

impl Default for TileLayout {
    fn default() -> Self {
        TileLayout::Grid { count: 4 }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Radiance for rays that hit nothing
    pub background: Background,
    /// Image partitioning for the parallel render
    pub tiles: TileLayout,
    /// Master seed; each tile derives its own generator from it
    pub seed: u64,
    /// Apply gamma 2.0 when quantizing to 8 bits
    pub gamma: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            samples_per_pixel: 16,
            max_depth: 50,
            background: Background::default(),
            tiles: TileLayout::default(),
            seed: 0,
            gamma: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_render_config() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "width": 64, "samples_per_pixel": 2 }"#).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.samples_per_pixel, 2);
        assert_eq!(config.height, 720);
        assert_eq!(config.max_depth, 50);
        assert_eq!(config.tiles, TileLayout::Grid { count: 4 });
    }

    #[test]
    fn test_background_variants() {
        let bg: Background = serde_json::from_str(
            r#"{ "type": "gradient", "horizon": [1.0, 1.0, 1.0], "zenith": [0.5, 0.7, 1.0] }"#,
        )
        .unwrap();
        assert_eq!(
            bg,
            Background::Gradient {
                horizon: Color::ONE,
                zenith: Color::new(0.5, 0.7, 1.0)
            }
        );
    }

    #[test]
    fn test_tile_layout_json() {
        let layout: TileLayout =
            serde_json::from_str(r#"{ "type": "buckets", "size": 32 }"#).unwrap();
        assert_eq!(layout, TileLayout::Buckets { size: 32 });
    }

    #[test]
    fn test_camera_defaults() {
        let camera: CameraSettings = serde_json::from_str(r#"{ "fov": 60.0 }"#).unwrap();
        assert_eq!(camera.fov, 60.0);
        assert_eq!(camera.target, Vec3::Z);
        assert_eq!(camera.up, Vec3::Y);
    }
}
