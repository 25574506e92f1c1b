//! Dot-grid (lattice) configuration.
//!
//! The lattice is the field of guide dots a kolam is drawn around. Points
//! sit `dot_spacing` pixels apart, offset by one spacing unit from the
//! canvas origin, so the first dot is at `(spacing, spacing)`.

use crate::error::ConfigError;
use crate::model::Color;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// How far the lattice extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridExtent {
    /// Exactly `grid_size × grid_size` dots.
    #[default]
    Square,
    /// A dot at every spacing step strictly inside the canvas.
    Fill,
}

/// Dot-grid parameters. Changing any of them regenerates the raster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Dots per side for [`GridExtent::Square`].
    pub grid_size: u32,
    /// Distance between neighbouring dots, in pixels.
    pub dot_spacing: f32,
    pub dot_radius: f32,
    pub dot_color: Color,
    /// When false the grid clears the raster and paints no dots.
    pub visible: bool,
    pub extent: GridExtent,
    /// Painted after clearing and before the dots. `None` leaves the
    /// raster transparent.
    pub background: Option<Color>,
}

pub const DEFAULT_GRID_SIZE: u32 = 10;
pub const DEFAULT_DOT_SPACING: f32 = 40.0;
pub const DEFAULT_DOT_RADIUS: f32 = 3.0;
/// Closer lattices would put several dots inside one pixel.
pub const MIN_DOT_SPACING: f32 = 1.0;

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            dot_spacing: DEFAULT_DOT_SPACING,
            dot_radius: DEFAULT_DOT_RADIUS,
            dot_color: Color::from_rgba8(0x93, 0x33, 0xEA, 255),
            visible: true,
            extent: GridExtent::Square,
            background: None,
        }
    }
}

impl GridConfig {
    pub fn new(grid_size: u32, dot_spacing: f32) -> Self {
        Self {
            grid_size,
            dot_spacing,
            ..Self::default()
        }
    }

    /// Check the lattice invariants: at least one dot per side, spacing of
    /// at least [`MIN_DOT_SPACING`], finite positive radius.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if !(self.dot_spacing.is_finite() && self.dot_spacing >= MIN_DOT_SPACING) {
            return Err(ConfigError::InvalidSpacing(self.dot_spacing));
        }
        if !(self.dot_radius.is_finite() && self.dot_radius > 0.0) {
            return Err(ConfigError::InvalidRadius(self.dot_radius));
        }
        Ok(())
    }

    /// Position of lattice point `(i, j)`.
    pub fn point(&self, i: u32, j: u32) -> Point {
        let spacing = self.dot_spacing as f64;
        Point::new(i as f64 * spacing + spacing, j as f64 * spacing + spacing)
    }

    /// Lattice points whose marker can touch a canvas of the given size,
    /// column-major (`i` outer, `j` inner). Empty when the grid is hidden.
    pub fn lattice_points(&self, canvas: Size) -> impl Iterator<Item = Point> + '_ {
        let (cols, rows) = if self.visible {
            self.dimensions(canvas)
        } else {
            (0, 0)
        };
        (0..cols).flat_map(move |i| (0..rows).map(move |j| self.point(i, j)))
    }

    /// Lattice columns × rows for the given canvas. A square lattice that
    /// overhangs the canvas is clipped to the dots whose disc still reaches
    /// it.
    pub fn dimensions(&self, canvas: Size) -> (u32, u32) {
        let spacing = self.dot_spacing as f64;
        if !(spacing.is_finite() && spacing > 0.0) {
            return (0, 0);
        }
        let steps = |reach: f64, cap: u32| -> u32 {
            // Dot k sits at (k + 1) * spacing and counts while it is short of `reach`
            let limit = (reach / spacing).ceil() - 1.0;
            limit.clamp(0.0, cap as f64) as u32
        };
        match self.extent {
            GridExtent::Square => {
                let radius = self.dot_radius.max(0.0) as f64;
                (
                    steps(canvas.width + radius, self.grid_size),
                    steps(canvas.height + radius, self.grid_size),
                )
            }
            GridExtent::Fill => (
                steps(canvas.width, u32::MAX),
                steps(canvas.height, u32::MAX),
            ),
        }
    }

    /// The canvas size that exactly frames a square lattice with one
    /// spacing unit of margin on each side.
    pub fn framing_size(&self) -> Size {
        let side = (self.grid_size as f64 + 1.0) * self.dot_spacing as f64;
        Size::new(side, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn square_lattice_is_offset_by_one_spacing() {
        let grid = GridConfig::new(3, 40.0);
        let points: Vec<Point> = grid.lattice_points(Size::new(500.0, 500.0)).collect();
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], Point::new(40.0, 40.0));
        assert_eq!(points[1], Point::new(40.0, 80.0));
        assert_eq!(points[8], Point::new(120.0, 120.0));
    }

    #[test]
    fn fill_lattice_stays_strictly_inside() {
        let grid = GridConfig {
            extent: GridExtent::Fill,
            ..GridConfig::new(1, 20.0)
        };
        // 20, 40, ..., 780 across; 20, 40, ..., 580 down
        assert_eq!(grid.dimensions(Size::new(800.0, 600.0)), (39, 29));
        assert_eq!(grid.dimensions(Size::new(810.0, 600.0)), (40, 29));
        assert_eq!(grid.dimensions(Size::new(20.0, 20.0)), (0, 0));
    }

    #[test]
    fn oversized_square_lattice_is_clipped_to_canvas() {
        let grid = GridConfig::new(u32::MAX, 40.0);
        // Dots at 40..=480; the one at 520 has its disc start at 517
        assert_eq!(grid.dimensions(Size::new(500.0, 500.0)), (12, 12));
        assert_eq!(grid.lattice_points(Size::new(500.0, 500.0)).count(), 144);
        // A disc overhanging the edge still counts
        assert_eq!(grid.dimensions(Size::new(518.0, 100.0)), (13, 2));
    }

    #[test]
    fn hidden_grid_has_no_points() {
        let grid = GridConfig {
            visible: false,
            ..GridConfig::default()
        };
        assert_eq!(grid.lattice_points(Size::new(500.0, 500.0)).count(), 0);
    }

    #[test]
    fn validation() {
        assert!(GridConfig::default().validate().is_ok());
        assert!(matches!(
            GridConfig::new(0, 40.0).validate(),
            Err(ConfigError::ZeroGridSize)
        ));
        assert!(matches!(
            GridConfig::new(5, 0.0).validate(),
            Err(ConfigError::InvalidSpacing(_))
        ));
        assert!(matches!(
            GridConfig::new(5, f32::INFINITY).validate(),
            Err(ConfigError::InvalidSpacing(_))
        ));
        let dense_fill = GridConfig {
            extent: GridExtent::Fill,
            ..GridConfig::new(1, 1e-30)
        };
        assert!(matches!(dense_fill.validate(), Err(ConfigError::InvalidSpacing(_))));
        assert!(GridConfig::new(5, MIN_DOT_SPACING).validate().is_ok());
        let bad_radius = GridConfig {
            dot_radius: -1.0,
            ..GridConfig::default()
        };
        assert!(matches!(bad_radius.validate(), Err(ConfigError::InvalidRadius(_))));
    }

    #[test]
    fn framing_size_fits_default_board() {
        assert_eq!(GridConfig::new(10, 40.0).framing_size(), Size::new(440.0, 440.0));
    }
}
