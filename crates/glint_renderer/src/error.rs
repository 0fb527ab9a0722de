use thiserror::Error;

/// Errors that can occur when setting up a render.
///
/// Rendering itself cannot fail once these checks pass: misses and
/// exhausted bounce budgets are ordinary outcomes, not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Camera is {camera_width}x{camera_height} but render config is {width}x{height}")]
    DimensionMismatch {
        camera_width: u32,
        camera_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Samples per pixel must be at least 1")]
    NoSamples,

    #[error("Invalid tile layout: {0}")]
    InvalidTileLayout(String),

    #[error("Tile {tile} overlaps another tile on row {row}")]
    OverlappingTiles { tile: usize, row: u32 },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
