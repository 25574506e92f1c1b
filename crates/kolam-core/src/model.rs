//! Core value types shared by every layer of the board.
//!
//! Colors, the brush/eraser tool mode, brush-size bounds and the fixed
//! color palettes offered next to the canvas.

use crate::error::ConfigError;
use crate::parser::parse_color;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
///
/// Serializes as a hex string (`"#7C3AED"`) and deserializes from any
/// string [`parse_color`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_digit(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse a hex color: `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let digits: Vec<u8> = hex
            .bytes()
            .map(hex_digit)
            .collect::<Option<Vec<u8>>>()?;

        match digits.len() {
            3 | 4 => {
                let a = digits.get(3).map_or(255, |d| d * 17);
                Some(Self::from_rgba8(digits[0] * 17, digits[1] * 17, digits[2] * 17, a))
            }
            6 | 8 => {
                let byte = |i: usize| digits[i] << 4 | digits[i + 1];
                let a = if digits.len() == 8 { byte(6) } else { 255 };
                Some(Self::from_rgba8(byte(0), byte(2), byte(4), a))
            }
            _ => None,
        }
    }

    /// Channels as 8-bit, straight (non-premultiplied) alpha.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    pub fn is_opaque(&self) -> bool {
        channel(self.a) == 255
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_color(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

// ─── Tools ───────────────────────────────────────────────────────────────

/// How new stroke segments are composited onto the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// Paint with the active color over existing content.
    #[default]
    Brush,
    /// Punch stroked pixels back to full transparency.
    Eraser,
}

impl ToolMode {
    pub fn name(self) -> &'static str {
        match self {
            ToolMode::Brush => "brush",
            ToolMode::Eraser => "eraser",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "brush" | "pen" => Ok(ToolMode::Brush),
            "eraser" => Ok(ToolMode::Eraser),
            _ => Err(ConfigError::UnknownTool(name.to_string())),
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ToolMode::Brush => ToolMode::Eraser,
            ToolMode::Eraser => ToolMode::Brush,
        }
    }
}

/// Brush width bounds, in pixels.
pub const MIN_BRUSH_SIZE: f32 = 1.0;
pub const MAX_BRUSH_SIZE: f32 = 20.0;
pub const DEFAULT_BRUSH_SIZE: f32 = 3.0;

/// Clamp a requested brush width into `[MIN_BRUSH_SIZE, MAX_BRUSH_SIZE]`.
/// Non-finite input falls back to the default width.
pub fn clamp_brush_size(size: f32) -> f32 {
    if size.is_finite() {
        size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
    } else {
        DEFAULT_BRUSH_SIZE
    }
}

// ─── Palettes ────────────────────────────────────────────────────────────

/// An ordered set of swatches offered next to the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    pub colors: Vec<Color>,
}

impl Palette {
    /// The six-swatch workspace palette.
    pub fn workspace() -> Self {
        Self::from_hex_list(&[
            "#7C3AED", "#E11D48", "#F59E0B", "#14B8A6", "#FFFFFF", "#000000",
        ])
    }

    /// The ten-swatch creation-board palette.
    pub fn board() -> Self {
        Self::from_hex_list(&[
            "#FF6B35", "#F7931E", "#FFD23F", "#06FFA5", "#118AB2", "#8B5CF6", "#EC4899",
            "#EF4444", "#10B981", "#3B82F6",
        ])
    }

    fn from_hex_list(list: &[&str]) -> Self {
        Self {
            colors: list.iter().filter_map(|h| Color::from_hex(h)).collect(),
        }
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the swatch matching `color` at 8-bit precision.
    pub fn position(&self, color: Color) -> Option<usize> {
        let wanted = color.to_rgba8();
        self.colors.iter().position(|c| c.to_rgba8() == wanted)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::workspace()
    }
}
