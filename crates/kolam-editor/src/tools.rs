//! Color and tool state.
//!
//! Holds what the next stroke will look like: color, brush width and
//! brush/eraser mode, plus the palette the color is usually picked from.
//! Changes only affect strokes started afterwards.

use kolam_core::config::BrushConfig;
use kolam_core::model::{Color, Palette, ToolMode, clamp_brush_size};
use kolam_core::{ConfigError, parse_color};
use kolam_render::Pen;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    color: Color,
    size: f32,
    mode: ToolMode,
    palette: Palette,
}

/// Snapshot of the tool state for UI panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSnapshot {
    pub color: Color,
    pub size: f32,
    pub mode: ToolMode,
    pub palette: Palette,
    /// Index of the active color in the palette, if it is one of the swatches.
    pub swatch: Option<usize>,
}

impl ToolState {
    pub fn new(brush: &BrushConfig, palette: Palette) -> Self {
        Self {
            color: brush.color,
            size: clamp_brush_size(brush.size),
            mode: brush.mode,
            palette,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Set the color from a picker/CSS string. Invalid input leaves the
    /// current color untouched.
    pub fn set_color_str(&mut self, value: &str) -> Result<Color, ConfigError> {
        let color = parse_color(value)?;
        self.color = color;
        Ok(color)
    }

    /// Pick palette swatch `index`. Returns `false` when out of range.
    pub fn select_swatch(&mut self, index: usize) -> bool {
        match self.palette.get(index) {
            Some(color) => {
                self.color = color;
                true
            }
            None => false,
        }
    }

    /// Set the brush width, clamped into range. Returns the applied width.
    pub fn set_size(&mut self, size: f32) -> f32 {
        self.size = clamp_brush_size(size);
        self.size
    }

    pub fn nudge_size(&mut self, delta: f32) -> f32 {
        self.set_size(self.size + delta)
    }

    pub fn set_mode(&mut self, mode: ToolMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> ToolMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// The pen a stroke started now would use.
    pub fn pen(&self) -> Pen {
        match self.mode {
            ToolMode::Brush => Pen::brush(self.color, self.size),
            ToolMode::Eraser => Pen::eraser(self.size),
        }
    }

    pub fn snapshot(&self) -> ToolSnapshot {
        ToolSnapshot {
            color: self.color,
            size: self.size,
            mode: self.mode,
            palette: self.palette.clone(),
            swatch: self.palette.position(self.color),
        }
    }
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(&BrushConfig::default(), Palette::default())
    }
}
