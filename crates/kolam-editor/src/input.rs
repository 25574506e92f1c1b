//! Input abstraction layer.
//!
//! Normalizes mouse, touch and pen events into a unified `InputEvent`
//! consumed by the stroke capture, and maps viewport (client) coordinates
//! onto the canvas raster.

use kurbo::{Point, Rect, Size};

/// Keyboard modifier state captured with an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event. Pointer coordinates are canvas-local pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { x: f64, y: f64 },

    /// Pointer moved, with or without a button held.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Pointer left the canvas element.
    PointerLeave,

    /// Keyboard shortcut candidate.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(p: Point) -> Self {
        Self::PointerDown { x: p.x, y: p.y }
    }

    pub fn pointer_move(p: Point) -> Self {
        Self::PointerMove { x: p.x, y: p.y }
    }

    pub fn pointer_up(p: Point) -> Self {
        Self::PointerUp { x: p.x, y: p.y }
    }

    /// Extract position if this is a positioned pointer event.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some(Point::new(*x, *y))
            }
            _ => None,
        }
    }
}

/// Where the canvas element sits in the viewport, and how big its raster is.
///
/// The element may be displayed at a CSS size different from its raster
/// size (`w-full` layouts); client coordinates are scaled accordingly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasViewport {
    /// The element's bounding client rect.
    pub client_rect: Rect,
    /// The raster dimensions.
    pub raster: Size,
}

impl CanvasViewport {
    pub fn new(client_rect: Rect, raster: Size) -> Self {
        Self {
            client_rect,
            raster,
        }
    }

    /// Translate viewport coordinates to canvas-local coordinates.
    ///
    /// A degenerate client rect (element not laid out yet) falls back to a
    /// plain offset without scaling.
    pub fn to_canvas(&self, client: Point) -> Point {
        let local = client - self.client_rect.origin();
        let (w, h) = (self.client_rect.width(), self.client_rect.height());
        if w > 0.0 && h > 0.0 {
            Point::new(
                local.x * self.raster.width / w,
                local.y * self.raster.height / h,
            )
        } else {
            local.to_point()
        }
    }
}
