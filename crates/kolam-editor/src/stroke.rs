//! Freehand stroke capture.
//!
//! A two-state machine, **Idle** and **Drawing**:
//!
//! | From    | Event                        | To      | Effect                   |
//! |---------|------------------------------|---------|--------------------------|
//! | Idle    | down inside bounds           | Drawing | record start, fix pen    |
//! | Drawing | move inside bounds           | Drawing | segment last → current   |
//! | Drawing | move outside bounds          | Idle    | stroke ends, no segment  |
//! | Drawing | up / leave                   | Idle    | stroke ends              |
//! | Drawing | down inside bounds           | Drawing | stroke restarts          |
//! | Idle    | move / up / leave / outside  | Idle    | nothing                  |
//!
//! Segments are handed back one at a time so the controller can commit
//! each straight to the raster; there is no preview layer.

use crate::input::InputEvent;
use kolam_render::Pen;
use kurbo::{Line, Point, Rect};

/// One committed piece of a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub line: Line,
    pub pen: Pen,
}

/// What a single event did to the stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeEffect {
    /// The event did not change anything.
    None,
    /// A stroke began at this point.
    Started(Point),
    /// A segment should be committed.
    Segment(Segment),
    /// The stroke finished after producing `segments` segments.
    Ended { segments: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Drawing {
        last: Point,
        pen: Pen,
        segments: usize,
    },
}

#[derive(Debug, Clone)]
pub struct StrokeCapture {
    phase: Phase,
}

impl Default for StrokeCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self { phase: Phase::Idle }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.phase, Phase::Drawing { .. })
    }

    /// Last recorded point of the stroke in progress.
    pub fn last_point(&self) -> Option<Point> {
        match self.phase {
            Phase::Drawing { last, .. } => Some(last),
            Phase::Idle => None,
        }
    }

    /// Feed one event. `pen` is only read on pointer-down; `bounds` is the
    /// canvas rect in canvas-local coordinates.
    pub fn handle(&mut self, event: &InputEvent, pen: Pen, bounds: Rect) -> StrokeEffect {
        match *event {
            InputEvent::PointerDown { x, y } => {
                let start = Point::new(x, y);
                if !bounds.contains(start) {
                    return StrokeEffect::None;
                }
                if self.is_drawing() {
                    log::debug!("pointer-down during stroke; restarting at {start:?}");
                }
                self.phase = Phase::Drawing {
                    last: start,
                    pen,
                    segments: 0,
                };
                log::debug!("stroke started at ({x:.1}, {y:.1}) {:?}", pen.mode);
                StrokeEffect::Started(start)
            }
            InputEvent::PointerMove { x, y } => {
                let Phase::Drawing {
                    last,
                    pen,
                    segments,
                } = self.phase
                else {
                    return StrokeEffect::None;
                };
                let current = Point::new(x, y);
                if !bounds.contains(current) {
                    return self.finish();
                }
                if current == last {
                    return StrokeEffect::None;
                }
                self.phase = Phase::Drawing {
                    last: current,
                    pen,
                    segments: segments + 1,
                };
                StrokeEffect::Segment(Segment {
                    line: Line::new(last, current),
                    pen,
                })
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => self.finish(),
            InputEvent::Key { .. } => StrokeEffect::None,
        }
    }

    /// End the stroke in progress, if any.
    pub fn finish(&mut self) -> StrokeEffect {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Drawing { segments, .. } => {
                log::debug!("stroke ended after {segments} segments");
                StrokeEffect::Ended { segments }
            }
            Phase::Idle => StrokeEffect::None,
        }
    }
}
