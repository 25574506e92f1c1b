//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser bridge and any native shell share one binding set:
//!
//! | Key                     | Action                       |
//! |-------------------------|------------------------------|
//! | `b`                     | brush                        |
//! | `e`                     | eraser                       |
//! | `x`                     | toggle brush / eraser        |
//! | `[` / `]`               | brush size −1 / +1           |
//! | `g`                     | show / hide the dot grid     |
//! | `1`–`9`                 | palette swatch               |
//! | `Escape`                | cancel the stroke            |
//! | ⌘S                      | export PNG                   |
//! | ⌘Delete / ⌘Backspace    | reset the canvas             |

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ToolBrush,
    ToolEraser,
    ToggleTool,
    BrushSmaller,
    BrushLarger,
    ToggleGrid,
    /// Zero-based palette index.
    Swatch(usize),
    CancelStroke,
    Export,
    Reset,
}

impl ShortcutAction {
    /// Stable camelCase name reported to the UI.
    pub fn name(self) -> &'static str {
        match self {
            ShortcutAction::ToolBrush => "toolBrush",
            ShortcutAction::ToolEraser => "toolEraser",
            ShortcutAction::ToggleTool => "toggleTool",
            ShortcutAction::BrushSmaller => "brushSmaller",
            ShortcutAction::BrushLarger => "brushLarger",
            ShortcutAction::ToggleGrid => "toggleGrid",
            ShortcutAction::Swatch(_) => "swatch",
            ShortcutAction::CancelStroke => "cancelStroke",
            ShortcutAction::Export => "export",
            ShortcutAction::Reset => "reset",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// `key` is the `KeyboardEvent.key` value (e.g. `"e"`, `"Delete"`).
pub struct ShortcutMap;

impl ShortcutMap {
    pub fn resolve(key: &str, modifiers: &Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            return match key {
                "s" | "S" => Some(ShortcutAction::Export),
                "Delete" | "Backspace" => Some(ShortcutAction::Reset),
                _ => None,
            };
        }
        if modifiers.alt {
            return None;
        }

        match key {
            "b" | "B" => Some(ShortcutAction::ToolBrush),
            "e" | "E" => Some(ShortcutAction::ToolEraser),
            "x" | "X" => Some(ShortcutAction::ToggleTool),
            "[" => Some(ShortcutAction::BrushSmaller),
            "]" => Some(ShortcutAction::BrushLarger),
            "g" | "G" => Some(ShortcutAction::ToggleGrid),
            "Escape" => Some(ShortcutAction::CancelStroke),
            _ => Self::swatch(key),
        }
    }

    fn swatch(key: &str) -> Option<ShortcutAction> {
        let mut chars = key.chars();
        let digit = chars.next()?.to_digit(10)?;
        if chars.next().is_some() || digit == 0 {
            return None;
        }
        Some(ShortcutAction::Swatch(digit as usize - 1))
    }
}
