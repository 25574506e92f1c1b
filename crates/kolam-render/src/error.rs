//! Renderer error types.

use thiserror::Error;

/// Result type for raster operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while allocating or encoding the raster.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The pixmap could not be allocated at this size.
    #[error("cannot allocate a {width}x{height} raster")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
