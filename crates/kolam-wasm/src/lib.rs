//! WASM bridge for Kolam Board: exposes the drawing controller to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page creates one
//! `KolamCanvas`, binds it to a `<canvas>` element and forwards pointer and
//! key events; the raster is blitted back after every visible change.

mod console;
mod dom;

use kolam_core::config::CanvasConfig;
use kolam_core::model::ToolMode;
use kolam_core::{Point, parse_color};
use kolam_editor::{
    ActionOutcome, CanvasViewport, DrawingController, EditorError, InputEvent, Modifiers,
    ShortcutAction, StrokeEffect,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// The main WASM-facing canvas controller.
///
/// Owns the drawing controller and, optionally, the element it presents to.
/// Every operation that needs the element degrades to a logged no-op while
/// unbound.
#[wasm_bindgen]
pub struct KolamCanvas {
    controller: DrawingController,
    canvas: Option<HtmlCanvasElement>,
}

/// Reply to `handle_key`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyReply {
    changed: bool,
    action: &'static str,
    outcome: &'static str,
    tool: &'static str,
}

#[wasm_bindgen]
impl KolamCanvas {
    /// Create a controller with the default workspace configuration at the
    /// given raster size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<KolamCanvas, JsValue> {
        Self::build(CanvasConfig {
            width,
            height,
            ..CanvasConfig::default()
        })
        .map_err(to_js_error)
    }

    /// Create a controller from a camelCase JSON configuration.
    pub fn from_config(json: &str) -> Result<KolamCanvas, JsValue> {
        CanvasConfig::from_json(json)
            .map_err(EditorError::from)
            .and_then(Self::build)
            .map_err(to_js_error)
    }

    /// The dark full-canvas creation board.
    pub fn board() -> Result<KolamCanvas, JsValue> {
        Self::build(CanvasConfig::board()).map_err(to_js_error)
    }

    // ─── Element binding ─────────────────────────────────────────────────

    /// Bind to a canvas element. The element's backing store is sized to
    /// the raster and the current raster is presented immediately.
    pub fn attach(&mut self, canvas: HtmlCanvasElement) -> bool {
        canvas.set_width(self.controller.raster().width());
        canvas.set_height(self.controller.raster().height());
        self.canvas = Some(canvas);
        self.render()
    }

    /// Bind to the canvas element with the given id.
    pub fn attach_by_id(&mut self, id: &str) -> bool {
        match dom::canvas_by_id(id) {
            Some(canvas) => self.attach(canvas),
            None => {
                log::warn!("no <canvas> with id {id:?}");
                false
            }
        }
    }

    pub fn detach(&mut self) {
        self.canvas = None;
    }

    pub fn is_attached(&self) -> bool {
        self.canvas.is_some()
    }

    /// Copy the raster onto the bound element. Returns `false` when unbound
    /// or when no 2D context is available.
    pub fn render(&self) -> bool {
        let Some(canvas) = &self.canvas else {
            log::warn!("render skipped: no canvas bound");
            return false;
        };
        let Some(ctx) = dom::context_2d(canvas) else {
            log::warn!("render skipped: 2D context unavailable");
            return false;
        };
        let raster = self.controller.raster();
        match dom::put_rgba(&ctx, &raster.to_rgba8(), raster.width(), raster.height()) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("putImageData failed: {e:?}");
                false
            }
        }
    }

    /// Reallocate the raster. Strokes are lost and the grid is redrawn.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if let Err(e) = self.controller.resize(width, height) {
            log::warn!("resize rejected: {e}");
            return false;
        }
        if let Some(canvas) = &self.canvas {
            canvas.set_width(width);
            canvas.set_height(height);
        }
        self.present();
        true
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Pointer down at viewport (client) coordinates. Returns `true` when a
    /// stroke started.
    pub fn handle_pointer_down(&mut self, client_x: f64, client_y: f64) -> bool {
        match self.to_canvas(client_x, client_y) {
            Some(p) => self.pointer_down_at(p.x, p.y),
            None => false,
        }
    }

    /// Pointer move at viewport coordinates. Returns `true` when the stroke
    /// state changed.
    pub fn handle_pointer_move(&mut self, client_x: f64, client_y: f64) -> bool {
        match self.to_canvas(client_x, client_y) {
            Some(p) => self.pointer_move_at(p.x, p.y),
            None => false,
        }
    }

    pub fn handle_pointer_up(&mut self, client_x: f64, client_y: f64) -> bool {
        match self.to_canvas(client_x, client_y) {
            Some(p) => self.pointer_up_at(p.x, p.y),
            None => self.forward(InputEvent::PointerLeave),
        }
    }

    pub fn handle_pointer_leave(&mut self) -> bool {
        self.forward(InputEvent::PointerLeave)
    }

    /// Pointer down at canvas-local coordinates.
    pub fn pointer_down_at(&mut self, x: f64, y: f64) -> bool {
        self.forward(InputEvent::pointer_down(Point::new(x, y)))
    }

    pub fn pointer_move_at(&mut self, x: f64, y: f64) -> bool {
        self.forward(InputEvent::pointer_move(Point::new(x, y)))
    }

    pub fn pointer_up_at(&mut self, x: f64, y: f64) -> bool {
        self.forward(InputEvent::pointer_up(Point::new(x, y)))
    }

    pub fn is_drawing(&self) -> bool {
        self.controller.is_drawing()
    }

    // ─── Grid ────────────────────────────────────────────────────────────

    /// Returns `false` (and keeps the current grid) for a size of zero.
    pub fn set_grid_size(&mut self, grid_size: u32) -> bool {
        let result = self.controller.set_grid_size(grid_size);
        self.after_grid_change(result)
    }

    /// Returns `false` (and keeps the current grid) for a non-positive or
    /// non-finite spacing.
    pub fn set_dot_spacing(&mut self, dot_spacing: f32) -> bool {
        let result = self.controller.set_dot_spacing(dot_spacing);
        self.after_grid_change(result)
    }

    pub fn set_show_grid(&mut self, visible: bool) {
        self.controller.set_grid_visible(visible);
        self.present();
    }

    /// Dot color from any accepted color string.
    pub fn set_dot_color(&mut self, value: &str) -> bool {
        match parse_color(value) {
            Ok(color) => {
                self.controller.set_dot_color(color);
                self.present();
                true
            }
            Err(e) => {
                log::warn!("dot color rejected: {e}");
                false
            }
        }
    }

    /// Background fill painted under the dots. An empty string clears it.
    pub fn set_background(&mut self, value: &str) -> bool {
        let background = if value.trim().is_empty() {
            None
        } else {
            match parse_color(value) {
                Ok(color) => Some(color),
                Err(e) => {
                    log::warn!("background rejected: {e}");
                    return false;
                }
            }
        };
        self.controller.set_background(background);
        self.present();
        true
    }

    /// Regenerate the grid, discarding strokes.
    pub fn render_grid(&mut self) -> u32 {
        let dots = self.controller.render_grid();
        self.present();
        dots as u32
    }

    // ─── Tools ───────────────────────────────────────────────────────────

    /// Set the brush color from a picker value. Returns `false` on a
    /// malformed color, leaving the current one in place.
    pub fn set_color(&mut self, value: &str) -> bool {
        match self.controller.tools_mut().set_color_str(value) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("color rejected: {e}");
                false
            }
        }
    }

    pub fn get_color(&self) -> String {
        self.controller.tools().color().to_hex()
    }

    pub fn select_swatch(&mut self, index: usize) -> bool {
        self.controller.tools_mut().select_swatch(index)
    }

    /// Set the brush width; returns the clamped value actually applied.
    pub fn set_brush_size(&mut self, size: f32) -> f32 {
        self.controller.tools_mut().set_size(size)
    }

    pub fn get_brush_size(&self) -> f32 {
        self.controller.tools().size()
    }

    /// Switch between `"brush"` and `"eraser"`.
    pub fn set_tool(&mut self, name: &str) -> bool {
        match ToolMode::from_name(name) {
            Ok(mode) => {
                self.controller.tools_mut().set_mode(mode);
                true
            }
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    pub fn get_tool_name(&self) -> String {
        self.controller.tools().mode().name().to_string()
    }

    // ─── Keyboard Shortcut API ───────────────────────────────────────────

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"changed":bool,"action":"<name>","outcome":"<name>","tool":"<tool>"}`
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let reply = match self.controller.handle_key(key, &modifiers) {
            Some((action, outcome)) => {
                match outcome {
                    ActionOutcome::RasterChanged => self.present(),
                    ActionOutcome::ExportRequested => {
                        self.download_png();
                    }
                    _ => {}
                }
                KeyReply {
                    changed: outcome != ActionOutcome::Unchanged,
                    action: action.name(),
                    outcome: outcome_name(outcome),
                    tool: self.controller.tools().mode().name(),
                }
            }
            None => KeyReply {
                changed: false,
                action: "none",
                outcome: outcome_name(ActionOutcome::Unchanged),
                tool: self.controller.tools().mode().name(),
            },
        };
        to_json(&reply)
    }

    /// Apply a named action directly (toolbar buttons share the shortcut
    /// vocabulary). Returns `false` for unknown names.
    pub fn apply_action(&mut self, name: &str) -> bool {
        let Some(action) = action_from_name(name) else {
            log::warn!("unknown action {name:?}");
            return false;
        };
        match self.controller.apply(action) {
            ActionOutcome::RasterChanged => self.present(),
            ActionOutcome::ExportRequested => {
                self.download_png();
            }
            _ => {}
        }
        true
    }

    // ─── Reset / export ──────────────────────────────────────────────────

    /// Discard every stroke and redraw the grid. Irreversible.
    pub fn reset(&mut self) {
        self.controller.reset_canvas();
        self.present();
    }

    /// Encoded PNG bytes of the current raster.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.controller
            .export_image()
            .map(|image| image.bytes)
            .map_err(to_js_error)
    }

    /// Encode the raster and offer it as a download under the configured
    /// filename. Returns `false` on failure.
    pub fn download_png(&self) -> bool {
        let image = match self.controller.export_image() {
            Ok(image) => image,
            Err(e) => {
                log::error!("export failed: {e}");
                return false;
            }
        };
        match dom::download_bytes(&image.filename, &image.bytes, image.mime_type) {
            Ok(()) => true,
            Err(e) => {
                log::error!("download failed: {e:?}");
                false
            }
        }
    }

    pub fn export_filename(&self) -> String {
        self.controller.config().export_filename.clone()
    }

    // ─── State queries ───────────────────────────────────────────────────

    /// Snapshot for UI panels:
    /// `{"width","height","attached","drawing","segments","dots","grid","tools","exportFilename"}`.
    pub fn state_json(&self) -> String {
        let config = self.controller.config();
        let state = serde_json::json!({
            "width": config.width,
            "height": config.height,
            "attached": self.is_attached(),
            "drawing": self.controller.is_drawing(),
            "segments": self.controller.segment_count(),
            "dots": self.controller.dot_count(),
            "grid": config.grid,
            "tools": self.controller.tools().snapshot(),
            "exportFilename": config.export_filename,
        });
        state.to_string()
    }

    /// The current configuration as camelCase JSON.
    pub fn config_json(&self) -> String {
        match self.controller.config().to_json() {
            Ok(json) => json,
            Err(e) => error_json(&e),
        }
    }
}

// ─── Private helpers ─────────────────────────────────────────────────────

impl KolamCanvas {
    fn build(config: CanvasConfig) -> Result<Self, EditorError> {
        console::console_error_panic_hook_setup();
        console::init();

        let controller = DrawingController::new(config)?;
        log::info!(
            "kolam canvas {}x{} ready ({} dots)",
            controller.raster().width(),
            controller.raster().height(),
            controller.dot_count()
        );
        Ok(Self {
            controller,
            canvas: None,
        })
    }

    /// Map viewport coordinates onto the raster through the element's
    /// bounding rect.
    fn to_canvas(&self, client_x: f64, client_y: f64) -> Option<Point> {
        let Some(canvas) = &self.canvas else {
            log::warn!("pointer event ignored: no canvas bound");
            return None;
        };
        let viewport =
            CanvasViewport::new(dom::client_rect(canvas), self.controller.raster().size());
        Some(viewport.to_canvas(Point::new(client_x, client_y)))
    }

    fn forward(&mut self, event: InputEvent) -> bool {
        let effect = self.controller.handle(&event);
        if matches!(effect, StrokeEffect::Segment(_)) {
            self.present();
        }
        effect != StrokeEffect::None
    }

    fn after_grid_change(&mut self, result: Result<usize, EditorError>) -> bool {
        match result {
            Ok(_) => {
                self.present();
                true
            }
            Err(_) => false,
        }
    }

    /// Blit if bound; silent otherwise.
    fn present(&self) {
        if self.canvas.is_some() {
            self.render();
        }
    }
}

fn outcome_name(outcome: ActionOutcome) -> &'static str {
    match outcome {
        ActionOutcome::Unchanged => "unchanged",
        ActionOutcome::ToolChanged => "toolChanged",
        ActionOutcome::RasterChanged => "rasterChanged",
        ActionOutcome::StrokeCancelled => "strokeCancelled",
        ActionOutcome::ExportRequested => "exportRequested",
    }
}

fn action_from_name(name: &str) -> Option<ShortcutAction> {
    let action = match name {
        "toolBrush" => ShortcutAction::ToolBrush,
        "toolEraser" => ShortcutAction::ToolEraser,
        "toggleTool" => ShortcutAction::ToggleTool,
        "brushSmaller" => ShortcutAction::BrushSmaller,
        "brushLarger" => ShortcutAction::BrushLarger,
        "toggleGrid" => ShortcutAction::ToggleGrid,
        "cancelStroke" => ShortcutAction::CancelStroke,
        "export" => ShortcutAction::Export,
        "reset" => ShortcutAction::Reset,
        _ => return None,
    };
    Some(action)
}

fn to_js_error(e: EditorError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| error_json(&e))
}

fn error_json(e: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "ok": false, "error": e.to_string() }).to_string()
}

// ─── Standalone validation functions (no canvas needed) ──────────────────

/// Validate a canvas configuration. Returns JSON: `{"ok":true}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(json: &str) -> String {
    match CanvasConfig::from_json(json) {
        Ok(_) => r#"{"ok":true}"#.to_string(),
        Err(e) => error_json(&e),
    }
}

/// Normalize a color string to hex. Returns JSON:
/// `{"ok":true,"color":"#RRGGBB"}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn normalize_color(value: &str) -> String {
    match parse_color(value) {
        Ok(color) => serde_json::json!({ "ok": true, "color": color.to_hex() }).to_string(),
        Err(e) => error_json(&e),
    }
}

/// Change the console log level (`"error"` … `"trace"`, or `"off"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match console::parse_level(level) {
        Some(filter) => {
            log::set_max_level(filter);
            true
        }
        None => false,
    }
}
