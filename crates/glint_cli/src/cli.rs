use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_core::{CameraSettings, RenderConfig, TileLayout, Vec3};
use log::LevelFilter;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments. Anything given here overrides the scene file.
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "A small tiled Monte Carlo path tracer")]
pub struct Args {
    /// JSON scene file (defaults to the built-in demo scene)
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output image path; the format follows the extension
    #[arg(short, long, default_value = "out.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(short = 'n', long)]
    pub samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Horizontal field of view in degrees
    #[arg(long)]
    pub fov: Option<f32>,

    /// Number of parallel tiles, arranged as a grid
    #[arg(long, conflicts_with = "bucket_size")]
    pub tiles: Option<u32>,

    /// Render fixed-size buckets in spiral order instead of a tile grid
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Master random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write linear values without gamma correction
    #[arg(long)]
    pub no_gamma: bool,

    /// Print the scene as JSON and exit without rendering
    #[arg(long)]
    pub dump_scene: bool,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of the scene file settings.
    pub fn apply(&self, camera: &mut CameraSettings, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(count) = self.tiles {
            config.tiles = TileLayout::Grid { count };
        }
        if let Some(size) = self.bucket_size {
            config.tiles = TileLayout::Buckets { size };
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.no_gamma {
            config.gamma = false;
        }
        if let Some(fov) = self.fov {
            camera.fov = fov;
        }
    }
}

/// Short human readable description of a camera for the startup log.
pub fn describe_camera(camera: &CameraSettings) -> String {
    let fmt = |v: Vec3| format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z);
    format!(
        "camera at {} looking at {}, fov {:.1}",
        fmt(camera.position),
        fmt(camera.target),
        camera.fov
    )
}
