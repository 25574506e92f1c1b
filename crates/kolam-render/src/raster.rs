//! The canvas raster.
//!
//! A single RGBA bitmap backed by a `tiny_skia::Pixmap`, mutated in place
//! by grid draws and stroke segments. Pixels are stored premultiplied;
//! every accessor that hands pixels out demultiplies them first.

use crate::error::{RenderError, RenderResult};
use kolam_core::model::{Color, ToolMode};
use kurbo::{Line, Point, Rect, Size};
use tiny_skia::{
    BlendMode, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

/// How a stroke segment is committed: color, width and compositing mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: Color,
    pub width: f32,
    pub mode: ToolMode,
}

impl Pen {
    pub fn brush(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            mode: ToolMode::Brush,
        }
    }

    pub fn eraser(width: f32) -> Self {
        Self {
            color: Color::BLACK,
            width,
            mode: ToolMode::Eraser,
        }
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.anti_alias = true;
        match self.mode {
            ToolMode::Brush => {
                let [r, g, b, a] = self.color.to_rgba8();
                paint.set_color_rgba8(r, g, b, a);
                paint.blend_mode = BlendMode::SourceOver;
            }
            ToolMode::Eraser => {
                // Opaque source + destination-out leaves full transparency
                paint.set_color_rgba8(0, 0, 0, 255);
                paint.blend_mode = BlendMode::DestinationOut;
            }
        }
        paint
    }

    fn stroke(&self) -> Stroke {
        Stroke {
            width: self.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        }
    }
}

/// The bitmap owned by one drawing controller.
#[derive(Clone)]
pub struct Raster {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Raster {
    /// Allocate a fully transparent raster.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidDimensions { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    pub fn bounds(&self) -> Rect {
        self.size().to_rect()
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        let [r, g, b, a] = color.to_rgba8();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    /// Paint a filled disc. Returns `false` when the disc lies entirely
    /// outside the raster (nothing painted).
    pub fn fill_dot(&mut self, center: Point, radius: f32, color: Color) -> bool {
        let r = radius as f64;
        let disc = Rect::new(center.x - r, center.y - r, center.x + r, center.y + r);
        if disc.intersect(self.bounds()).area() <= 0.0 {
            return false;
        }
        let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius) else {
            return false;
        };
        let paint = Pen::brush(color, 1.0).paint();
        self.pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        true
    }

    /// Commit one line segment with round caps and joins.
    pub fn stroke_segment(&mut self, segment: Line, pen: &Pen) {
        let mut pb = PathBuilder::new();
        pb.move_to(segment.p0.x as f32, segment.p0.y as f32);
        pb.line_to(segment.p1.x as f32, segment.p1.y as f32);
        let Some(path) = pb.finish() else {
            log::trace!("skipping degenerate segment {segment:?}");
            return;
        };
        self.pixmap.stroke_path(
            &path,
            &pen.paint(),
            &pen.stroke(),
            Transform::identity(),
            None,
        );
    }

    /// Demultiplied RGBA of one pixel, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Alpha of the pixel nearest to `point`; `0` outside the raster.
    pub fn alpha_at(&self, point: Point) -> u8 {
        if point.x < 0.0 || point.y < 0.0 {
            return 0;
        }
        self.pixel(point.x as u32, point.y as u32)
            .map_or(0, |[_, _, _, a]| a)
    }

    /// Number of pixels with any coverage.
    pub fn painted_pixels(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    /// Row-major demultiplied RGBA bytes, as `ImageData` expects them.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.data().len());
        for p in self.pixmap.pixels() {
            let c = p.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        out
    }

    /// Raw premultiplied bytes. Two rasters with equal data are
    /// pixel-identical.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}
