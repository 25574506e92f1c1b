pub mod error;
pub mod export;
pub mod grid;
pub mod raster;

pub use error::{RenderError, RenderResult};
pub use export::{ExportedImage, PNG_MIME_TYPE, encode_png, export_png};
pub use grid::render_grid;
pub use raster::{Pen, Raster};
