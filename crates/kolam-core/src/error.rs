//! Configuration error types.

use thiserror::Error;

/// Errors raised while building or validating a canvas configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The lattice must contain at least one dot per side.
    #[error("grid size must be at least 1")]
    ZeroGridSize,

    /// Dot spacing must be finite and at least one pixel.
    #[error("dot spacing must be at least 1 pixel, got {0}")]
    InvalidSpacing(f32),

    /// Dot radius must be a finite, positive number of pixels.
    #[error("dot radius must be a positive number of pixels, got {0}")]
    InvalidRadius(f32),

    /// Canvas dimensions must both be non-zero.
    #[error("canvas dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    /// A color string could not be parsed.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// An unknown tool name was given.
    #[error("unknown tool: {0:?}")]
    UnknownTool(String),

    /// JSON (de)serialization failed.
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
