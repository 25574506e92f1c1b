pub mod controller;
pub mod error;
pub mod input;
pub mod shortcuts;
pub mod stroke;
pub mod tools;

pub use controller::{ActionOutcome, DrawingController};
pub use error::EditorError;
pub use input::{CanvasViewport, InputEvent, Modifiers};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use stroke::{Segment, StrokeCapture, StrokeEffect};
pub use tools::ToolState;
