//! Canvas configuration.
//!
//! Everything a drawing board needs before the first pointer event: raster
//! dimensions, the dot grid, the initial brush, the palette and the export
//! filename. Loaded from camelCase JSON; missing fields take defaults.

use crate::error::ConfigError;
use crate::grid::{GridConfig, GridExtent};
use crate::model::{Color, DEFAULT_BRUSH_SIZE, Palette, ToolMode, clamp_brush_size};
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Filename offered when the board is downloaded.
pub const DEFAULT_EXPORT_FILENAME: &str = "kolam-design.png";

/// Initial tool state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrushConfig {
    pub color: Color,
    pub size: f32,
    pub mode: ToolMode,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            color: Color::from_rgba8(0x7C, 0x3A, 0xED, 255),
            size: DEFAULT_BRUSH_SIZE,
            mode: ToolMode::Brush,
        }
    }
}

/// Full configuration for one drawing canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub grid: GridConfig,
    pub brush: BrushConfig,
    pub palette: Palette,
    pub export_filename: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            grid: GridConfig::default(),
            brush: BrushConfig::default(),
            palette: Palette::workspace(),
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }
}

impl CanvasConfig {
    /// The dark 800×600 creation board: dots every 20 px across the whole
    /// canvas on a navy background, with the ten-swatch palette.
    pub fn board() -> Self {
        let palette = Palette::board();
        let brush_color = palette.get(0).unwrap_or(BrushConfig::default().color);
        Self {
            width: 800,
            height: 600,
            grid: GridConfig {
                grid_size: 1,
                dot_spacing: 20.0,
                dot_radius: 2.0,
                dot_color: Color::from_rgba8(0x4A, 0x55, 0x68, 255),
                visible: true,
                extent: GridExtent::Fill,
                background: Some(Color::from_rgba8(0x1A, 0x1A, 0x2E, 255)),
            },
            brush: BrushConfig {
                color: brush_color,
                ..BrushConfig::default()
            },
            palette,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration. The brush size is clamped
    /// into range rather than rejected.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.brush.size = clamp_brush_size(config.brush.size);
        if config.export_filename.trim().is_empty() {
            config.export_filename = DEFAULT_EXPORT_FILENAME.to_string();
        }
        config.validate()?;
        log::debug!(
            "loaded canvas config {}x{} grid={}@{}",
            config.width,
            config.height,
            config.grid.grid_size,
            config.grid.dot_spacing
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        self.grid.validate()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Canvas bounds in canvas-local coordinates.
    pub fn bounds(&self) -> Rect {
        self.size().to_rect()
    }
}
