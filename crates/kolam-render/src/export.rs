//! Raster export.
//!
//! PNG is the only output format: lossless, and the dimensions always
//! match the raster regardless of what has been drawn.

use crate::error::{RenderError, RenderResult};
use crate::raster::Raster;

pub const PNG_MIME_TYPE: &str = "image/png";

/// An encoded image ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub filename: String,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// Encode the raster as PNG bytes.
///
/// # Errors
///
/// Returns an error if the encoder fails.
pub fn encode_png(raster: &Raster) -> RenderResult<Vec<u8>> {
    raster
        .pixmap()
        .encode_png()
        .map_err(|e| RenderError::Encode(e.to_string()))
}

/// Encode the raster and attach the download metadata.
///
/// # Errors
///
/// Returns an error if the encoder fails.
pub fn export_png(raster: &Raster, filename: &str) -> RenderResult<ExportedImage> {
    let bytes = encode_png(raster)?;
    log::info!(
        "exported {filename} ({}x{}, {} bytes)",
        raster.width(),
        raster.height(),
        bytes.len()
    );
    Ok(ExportedImage {
        filename: filename.to_string(),
        mime_type: PNG_MIME_TYPE,
        width: raster.width(),
        height: raster.height(),
        bytes,
    })
}
