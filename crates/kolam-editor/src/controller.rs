//! The drawing-canvas controller.
//!
//! One controller owns one raster. It regenerates the dot grid, turns
//! pointer input into committed stroke segments, resets and exports. Every
//! operation is synchronous; the caller presents the raster afterwards.

use crate::error::EditorError;
use crate::input::{InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::stroke::{StrokeCapture, StrokeEffect};
use crate::tools::ToolState;
use kolam_core::config::CanvasConfig;
use kolam_core::grid::{GridConfig, GridExtent};
use kolam_core::model::{Color, ToolMode};
use kolam_render::{ExportedImage, Raster, export_png, render_grid};
use kurbo::{Point, Rect};

/// Result of applying a shortcut action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing changed.
    Unchanged,
    /// Tool state changed; the raster did not.
    ToolChanged,
    /// The raster was regenerated (grid change or reset).
    RasterChanged,
    /// The stroke in progress was dropped.
    StrokeCancelled,
    /// The caller should export and offer a download.
    ExportRequested,
}

#[derive(Debug)]
pub struct DrawingController {
    config: CanvasConfig,
    raster: Raster,
    tools: ToolState,
    capture: StrokeCapture,
    /// Segments committed since the grid was last regenerated.
    segments: usize,
    /// Markers painted by the last grid regeneration.
    dots: usize,
}

impl DrawingController {
    /// Validate the config, allocate the raster and draw the initial grid.
    pub fn new(config: CanvasConfig) -> Result<Self, EditorError> {
        config.validate()?;
        let raster = Raster::new(config.width, config.height)?;
        let tools = ToolState::new(&config.brush, config.palette.clone());
        let mut controller = Self {
            config,
            raster,
            tools,
            capture: StrokeCapture::new(),
            segments: 0,
            dots: 0,
        };
        controller.render_grid();
        Ok(controller)
    }

    pub fn with_defaults() -> Result<Self, EditorError> {
        Self::new(CanvasConfig::default())
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridConfig {
        &self.config.grid
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolState {
        &mut self.tools
    }

    pub fn bounds(&self) -> Rect {
        self.raster.bounds()
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_drawing()
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }

    pub fn dot_count(&self) -> usize {
        self.dots
    }

    // ─── Grid ────────────────────────────────────────────────────────────

    /// Clear the raster and repaint the lattice. Drawn strokes are lost.
    pub fn render_grid(&mut self) -> usize {
        self.dots = render_grid(&mut self.raster, &self.config.grid);
        self.segments = 0;
        self.dots
    }

    /// Replace the grid configuration. Regenerates only when something
    /// actually changed; invalid configs are rejected and the current grid
    /// stays.
    pub fn set_grid(&mut self, grid: GridConfig) -> Result<usize, EditorError> {
        if let Err(e) = grid.validate() {
            log::warn!("rejected grid config: {e}");
            return Err(e.into());
        }
        if grid == self.config.grid {
            return Ok(self.dots);
        }
        self.config.grid = grid;
        Ok(self.render_grid())
    }

    pub fn set_grid_size(&mut self, grid_size: u32) -> Result<usize, EditorError> {
        self.set_grid(GridConfig {
            grid_size,
            ..self.config.grid.clone()
        })
    }

    pub fn set_dot_spacing(&mut self, dot_spacing: f32) -> Result<usize, EditorError> {
        self.set_grid(GridConfig {
            dot_spacing,
            ..self.config.grid.clone()
        })
    }

    pub fn set_grid_visible(&mut self, visible: bool) -> usize {
        self.update_grid(|grid| grid.visible = visible)
    }

    pub fn set_grid_extent(&mut self, extent: GridExtent) -> usize {
        self.update_grid(|grid| grid.extent = extent)
    }

    pub fn set_background(&mut self, background: Option<Color>) -> usize {
        self.update_grid(|grid| grid.background = background)
    }

    pub fn set_dot_color(&mut self, color: Color) -> usize {
        self.update_grid(|grid| grid.dot_color = color)
    }

    /// Apply a change that cannot break grid validity.
    fn update_grid(&mut self, change: impl FnOnce(&mut GridConfig)) -> usize {
        let mut grid = self.config.grid.clone();
        change(&mut grid);
        if grid != self.config.grid {
            self.config.grid = grid;
            self.render_grid();
        }
        self.dots
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Feed one input event. Segments are committed to the raster before
    /// this returns. Key events are ignored here; see [`Self::handle_key`].
    pub fn handle(&mut self, event: &InputEvent) -> StrokeEffect {
        let bounds = self.raster.bounds();
        let effect = self.capture.handle(event, self.tools.pen(), bounds);
        if let StrokeEffect::Segment(segment) = effect {
            log::trace!("commit {:?} w={}", segment.line, segment.pen.width);
            self.raster.stroke_segment(segment.line, &segment.pen);
            self.segments += 1;
        }
        effect
    }

    pub fn pointer_down(&mut self, p: Point) -> StrokeEffect {
        self.handle(&InputEvent::pointer_down(p))
    }

    pub fn pointer_move(&mut self, p: Point) -> StrokeEffect {
        self.handle(&InputEvent::pointer_move(p))
    }

    pub fn pointer_up(&mut self, p: Point) -> StrokeEffect {
        self.handle(&InputEvent::pointer_up(p))
    }

    pub fn pointer_leave(&mut self) -> StrokeEffect {
        self.handle(&InputEvent::PointerLeave)
    }

    // ─── Reset / export / resize ─────────────────────────────────────────

    /// Discard every stroke by regenerating the grid. Irreversible.
    pub fn reset_canvas(&mut self) -> usize {
        self.capture.finish();
        log::info!("canvas reset ({} segments discarded)", self.segments);
        self.render_grid()
    }

    /// Encode the raster as PNG under the configured filename.
    pub fn export_image(&self) -> Result<ExportedImage, EditorError> {
        Ok(export_png(&self.raster, &self.config.export_filename)?)
    }

    /// Reallocate the raster at a new size. Like resizing a browser
    /// canvas, this wipes strokes and regenerates the grid.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<usize, EditorError> {
        let raster = Raster::new(width, height)?;
        self.raster = raster;
        self.config.width = width;
        self.config.height = height;
        self.capture.finish();
        Ok(self.render_grid())
    }

    // ─── Shortcuts ───────────────────────────────────────────────────────

    /// Resolve and apply a key binding.
    pub fn handle_key(
        &mut self,
        key: &str,
        modifiers: &Modifiers,
    ) -> Option<(ShortcutAction, ActionOutcome)> {
        let action = ShortcutMap::resolve(key, modifiers)?;
        Some((action, self.apply(action)))
    }

    pub fn apply(&mut self, action: ShortcutAction) -> ActionOutcome {
        match action {
            ShortcutAction::ToolBrush => self.switch_mode(ToolMode::Brush),
            ShortcutAction::ToolEraser => self.switch_mode(ToolMode::Eraser),
            ShortcutAction::ToggleTool => {
                self.tools.toggle_mode();
                ActionOutcome::ToolChanged
            }
            ShortcutAction::BrushSmaller => self.nudge_brush(-1.0),
            ShortcutAction::BrushLarger => self.nudge_brush(1.0),
            ShortcutAction::ToggleGrid => {
                let visible = !self.config.grid.visible;
                self.set_grid_visible(visible);
                ActionOutcome::RasterChanged
            }
            ShortcutAction::Swatch(index) => {
                if self.tools.select_swatch(index) {
                    ActionOutcome::ToolChanged
                } else {
                    ActionOutcome::Unchanged
                }
            }
            ShortcutAction::CancelStroke => match self.capture.finish() {
                StrokeEffect::Ended { .. } => ActionOutcome::StrokeCancelled,
                _ => ActionOutcome::Unchanged,
            },
            ShortcutAction::Export => ActionOutcome::ExportRequested,
            ShortcutAction::Reset => {
                self.reset_canvas();
                ActionOutcome::RasterChanged
            }
        }
    }

    fn switch_mode(&mut self, mode: ToolMode) -> ActionOutcome {
        if self.tools.mode() == mode {
            return ActionOutcome::Unchanged;
        }
        self.tools.set_mode(mode);
        ActionOutcome::ToolChanged
    }

    fn nudge_brush(&mut self, delta: f32) -> ActionOutcome {
        let before = self.tools.size();
        if self.tools.nudge_size(delta) == before {
            ActionOutcome::Unchanged
        } else {
            ActionOutcome::ToolChanged
        }
    }
}
