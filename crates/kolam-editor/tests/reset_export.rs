//! Integration tests: reset and PNG export.
//!
//! Reset must leave the raster pixel-identical to a freshly generated grid,
//! and export must always produce an image of the configured size.

use kolam_core::config::CanvasConfig;
use kolam_core::grid::GridConfig;
use kolam_core::model::ToolMode;
use kolam_editor::{ActionOutcome, DrawingController, Modifiers, ShortcutAction};
use kolam_render::PNG_MIME_TYPE;
use kurbo::Point;
use pretty_assertions::assert_eq;

/// Width and height from the IHDR chunk.
fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
    assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    assert_eq!(&bytes[12..16], b"IHDR");
    let be = |at: usize| u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
    (be(16), be(20))
}

/// Scribble a zig-zag across the canvas with both tools.
fn scribble(controller: &mut DrawingController, strokes: usize) {
    let w = controller.raster().width() as f64;
    let h = controller.raster().height() as f64;
    for s in 0..strokes {
        let mode = if s % 3 == 2 { ToolMode::Eraser } else { ToolMode::Brush };
        controller.tools_mut().set_mode(mode);
        controller.tools_mut().set_size(1.0 + (s % 20) as f32);

        let y0 = (s as f64 * 37.0) % h;
        controller.pointer_down(Point::new(1.0, y0));
        for k in 1..12 {
            let x = w * k as f64 / 12.0;
            let y = if k % 2 == 0 { y0 } else { (y0 + 45.0) % h };
            controller.pointer_move(Point::new(x, y));
        }
        controller.pointer_up(Point::new(w - 1.0, y0));
    }
}

// ─── Reset ───────────────────────────────────────────────────────────────

#[test]
fn reset_matches_fresh_grid() {
    let config = CanvasConfig::default();
    let fresh = DrawingController::new(config.clone()).unwrap();
    let mut controller = DrawingController::new(config).unwrap();

    scribble(&mut controller, 8);
    assert!(controller.segment_count() > 0);
    assert!(controller.raster().data() != fresh.raster().data());

    assert_eq!(controller.reset_canvas(), 100);
    assert_eq!(controller.segment_count(), 0);
    assert!(controller.raster().data() == fresh.raster().data());
}

#[test]
fn reset_on_board_preset_restores_background() {
    let fresh = DrawingController::new(CanvasConfig::board()).unwrap();
    let mut controller = DrawingController::new(CanvasConfig::board()).unwrap();
    scribble(&mut controller, 5);
    controller.reset_canvas();
    assert!(controller.raster().data() == fresh.raster().data());
}

#[test]
fn reset_mid_stroke_aborts_it() {
    let mut controller = DrawingController::with_defaults().unwrap();
    controller.pointer_down(Point::new(10.0, 10.0));
    controller.pointer_move(Point::new(30.0, 10.0));
    controller.reset_canvas();

    assert!(!controller.is_drawing());
    controller.pointer_move(Point::new(60.0, 10.0));
    assert_eq!(controller.segment_count(), 0);
    assert_eq!(controller.raster().alpha_at(Point::new(45.0, 10.0)), 0);
}

#[test]
fn reset_shortcut_requires_command() {
    let mut controller = DrawingController::with_defaults().unwrap();
    assert_eq!(controller.handle_key("Delete", &Modifiers::NONE), None);

    let cmd = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };
    assert_eq!(
        controller.handle_key("Delete", &cmd),
        Some((ShortcutAction::Reset, ActionOutcome::RasterChanged))
    );
}

// ─── Export ──────────────────────────────────────────────────────────────

#[test]
fn export_dimensions_match_config_after_many_strokes() {
    let config = CanvasConfig {
        width: 321,
        height: 123,
        grid: GridConfig::new(3, 30.0),
        ..CanvasConfig::default()
    };
    let mut controller = DrawingController::new(config).unwrap();
    scribble(&mut controller, 40);

    let image = controller.export_image().unwrap();
    assert_eq!((image.width, image.height), (321, 123));
    assert_eq!(png_dimensions(&image.bytes), (321, 123));
    assert_eq!(image.mime_type, PNG_MIME_TYPE);
    assert_eq!(image.filename, "kolam-design.png");
}

#[test]
fn export_does_not_touch_raster() {
    let mut controller = DrawingController::with_defaults().unwrap();
    scribble(&mut controller, 3);
    let before = controller.raster().data().to_vec();
    let segments = controller.segment_count();

    controller.export_image().unwrap();
    controller.export_image().unwrap();

    assert!(controller.raster().data() == before.as_slice());
    assert_eq!(controller.segment_count(), segments);
}

#[test]
fn export_uses_configured_filename() {
    let config = CanvasConfig::from_json(r#"{"exportFilename":"rangoli.png"}"#).unwrap();
    let controller = DrawingController::new(config).unwrap();
    assert_eq!(controller.export_image().unwrap().filename, "rangoli.png");
}

#[test]
fn export_shortcut_only_requests() {
    let mut controller = DrawingController::with_defaults().unwrap();
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    assert_eq!(
        controller.handle_key("s", &ctrl),
        Some((ShortcutAction::Export, ActionOutcome::ExportRequested))
    );
}
