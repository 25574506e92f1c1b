pub mod config;
pub mod error;
pub mod grid;
pub mod model;
pub mod parser;

pub use config::{BrushConfig, CanvasConfig};
pub use error::ConfigError;
pub use grid::{GridConfig, GridExtent};
pub use model::*;
pub use parser::parse_color;

// Re-export kurbo geometry so downstream crates share one point type
pub use kurbo::{Line, Point, Rect, Size};
