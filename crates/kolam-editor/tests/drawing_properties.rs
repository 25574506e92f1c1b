//! Integration tests: grid rendering and stroke capture through the
//! controller (kolam-editor + kolam-render).
//!
//! Drives `DrawingController` with pointer sequences and inspects the
//! resulting raster pixels.

use kolam_core::config::CanvasConfig;
use kolam_core::grid::{GridConfig, GridExtent};
use kolam_core::model::{Color, ToolMode};
use kolam_editor::{DrawingController, InputEvent, StrokeEffect};
use kurbo::Point;
use pretty_assertions::assert_eq;

fn controller_for(grid: GridConfig) -> DrawingController {
    let size = grid.framing_size();
    let config = CanvasConfig {
        width: size.width as u32,
        height: size.height as u32,
        grid,
        ..CanvasConfig::default()
    };
    DrawingController::new(config).unwrap()
}

/// Sample points along `a → b` every half pixel.
fn samples(a: Point, b: Point) -> Vec<Point> {
    let steps = (a.distance(b) * 2.0).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|k| a.lerp(b, k as f64 / steps as f64))
        .collect()
}

// ─── Grid ────────────────────────────────────────────────────────────────

#[test]
fn grid_paints_exactly_n_squared_markers() {
    for n in [1u32, 2, 5, 10] {
        let grid = GridConfig::new(n, 40.0);
        let controller = controller_for(grid.clone());
        let raster = controller.raster();
        assert_eq!(controller.dot_count(), (n * n) as usize, "marker count for n={n}");

        for i in 0..n {
            for j in 0..n {
                assert_eq!(raster.alpha_at(grid.point(i, j)), 255, "missing dot ({i}, {j})");
            }
        }

        // Every painted pixel belongs to the nearest lattice dot
        let spacing = grid.dot_spacing as f64;
        let reach = grid.dot_radius as f64 + 1.0;
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                if raster.pixel(x, y).map_or(0, |[_, _, _, a]| a) == 0 {
                    continue;
                }
                let c = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let nearest = |v: f64| (v / spacing).round().clamp(1.0, n as f64) * spacing;
                let dot = Point::new(nearest(c.x), nearest(c.y));
                assert!(c.distance(dot) <= reach, "stray pixel at ({x}, {y}) for n={n}");
            }
        }
    }
}

#[test]
fn grid_render_is_idempotent() {
    let mut controller = controller_for(GridConfig::new(6, 25.0));
    let first = controller.raster().data().to_vec();
    controller.render_grid();
    controller.render_grid();
    assert!(controller.raster().data() == first.as_slice());
}

#[test]
fn grid_change_clears_previous_dots() {
    let mut controller = controller_for(GridConfig::new(5, 40.0));
    controller.set_dot_spacing(30.0).unwrap();
    // Old lattice point (200, 200) is gone; new one at (150, 150) is present
    assert_eq!(controller.raster().alpha_at(Point::new(200.0, 200.0)), 0);
    assert_eq!(controller.raster().alpha_at(Point::new(150.0, 150.0)), 255);
    assert_eq!(controller.dot_count(), 25);
}

#[test]
fn board_preset_fills_canvas_with_dots() {
    let controller = DrawingController::new(CanvasConfig::board()).unwrap();
    assert_eq!(controller.grid().extent, GridExtent::Fill);
    // 20..=780 across, 20..=580 down
    assert_eq!(controller.dot_count(), 39 * 29);
    assert_eq!(controller.raster().pixel(10, 10), Some([0x1A, 0x1A, 0x2E, 255]));
}

// ─── Stroke capture ──────────────────────────────────────────────────────

#[test]
fn click_without_move_draws_nothing() {
    let mut controller = controller_for(GridConfig::new(4, 40.0));
    let before = controller.raster().data().to_vec();

    controller.pointer_down(Point::new(60.0, 60.0));
    let effect = controller.pointer_up(Point::new(60.0, 60.0));

    assert_eq!(effect, StrokeEffect::Ended { segments: 0 });
    assert_eq!(controller.segment_count(), 0);
    assert!(controller.raster().data() == before.as_slice());
}

#[test]
fn move_while_idle_is_noop() {
    let mut controller = controller_for(GridConfig::new(4, 40.0));
    let before = controller.raster().data().to_vec();
    assert_eq!(controller.pointer_move(Point::new(30.0, 30.0)), StrokeEffect::None);
    assert_eq!(controller.pointer_up(Point::new(30.0, 30.0)), StrokeEffect::None);
    assert!(controller.raster().data() == before.as_slice());
}

#[test]
fn stroke_is_continuous_through_every_point() {
    let mut controller = controller_for(GridConfig::new(4, 40.0));
    let start = Point::new(20.0, 20.0);
    let a = Point::new(150.0, 30.0);
    let b = Point::new(60.0, 170.0);

    controller.pointer_down(start);
    controller.pointer_move(a);
    controller.pointer_move(b);
    assert_eq!(
        controller.pointer_up(b),
        StrokeEffect::Ended { segments: 2 }
    );
    assert_eq!(controller.segment_count(), 2);

    for p in samples(start, a).into_iter().chain(samples(a, b)) {
        assert!(
            controller.raster().alpha_at(p) > 0,
            "gap in stroke at {p:?}"
        );
    }
}

#[test]
fn second_pointer_down_leaves_gap_between_strokes() {
    let mut controller = controller_for(GridConfig::new(4, 40.0));
    controller.pointer_down(Point::new(10.0, 10.0));
    controller.pointer_move(Point::new(20.0, 20.0));
    assert_eq!(
        controller.pointer_down(Point::new(50.0, 50.0)),
        StrokeEffect::Started(Point::new(50.0, 50.0))
    );
    controller.pointer_move(Point::new(60.0, 60.0));
    assert_eq!(
        controller.pointer_up(Point::new(60.0, 60.0)),
        StrokeEffect::Ended { segments: 1 }
    );

    assert!(controller.raster().alpha_at(Point::new(15.0, 15.0)) > 0);
    assert!(controller.raster().alpha_at(Point::new(55.0, 55.0)) > 0);
    // Midway between the strokes, clear of the (40, 40) dot
    assert_eq!(controller.raster().alpha_at(Point::new(30.0, 30.0)), 0);
}

#[test]
fn stroke_uses_active_color() {
    let mut controller = controller_for(GridConfig::new(4, 40.0));
    controller.tools_mut().select_swatch(2);
    controller.tools_mut().set_size(6.0);
    controller.pointer_down(Point::new(10.0, 60.0));
    controller.pointer_move(Point::new(150.0, 60.0));
    controller.pointer_up(Point::new(150.0, 60.0));

    assert_eq!(
        controller.raster().pixel(100, 60),
        Some(Color::from_hex("#F59E0B").unwrap().to_rgba8())
    );
}

#[test]
fn leaving_canvas_terminates_stroke() {
    let mut controller = controller_for(GridConfig::new(2, 40.0));
    controller.pointer_down(Point::new(10.0, 10.0));
    controller.pointer_move(Point::new(50.0, 10.0));
    assert_eq!(
        controller.handle(&InputEvent::PointerLeave),
        StrokeEffect::Ended { segments: 1 }
    );
    // Re-entering with the button still held does not resume drawing
    assert_eq!(controller.pointer_move(Point::new(100.0, 100.0)), StrokeEffect::None);
    assert_eq!(controller.raster().alpha_at(Point::new(75.0, 55.0)), 0);
}

#[test]
fn move_outside_bounds_draws_no_artifact() {
    let mut controller = controller_for(GridConfig::new(2, 40.0));
    controller.pointer_down(Point::new(100.0, 10.0));
    assert_eq!(
        controller.pointer_move(Point::new(400.0, 10.0)),
        StrokeEffect::Ended { segments: 0 }
    );
    assert_eq!(controller.raster().alpha_at(Point::new(110.0, 10.0)), 0);
}

// ─── Eraser ──────────────────────────────────────────────────────────────

#[test]
fn eraser_removes_only_stroked_pixels() {
    let grid = GridConfig::new(4, 40.0);
    let fresh = controller_for(grid.clone());
    let mut controller = controller_for(grid);

    let from = Point::new(10.0, 20.0);
    let to = Point::new(150.0, 20.0);
    controller.pointer_down(from);
    controller.pointer_move(to);
    controller.pointer_up(to);
    assert!(controller.raster().alpha_at(Point::new(80.0, 20.0)) > 0);

    controller.tools_mut().set_mode(ToolMode::Eraser);
    controller.tools_mut().set_size(12.0);
    controller.pointer_down(from);
    controller.pointer_move(to);
    controller.pointer_up(to);

    // The wide eraser covers the whole brush stroke and no dot
    assert!(controller.raster().data() == fresh.raster().data());
}

#[test]
fn eraser_over_dot_removes_it() {
    let mut controller = controller_for(GridConfig::new(2, 40.0));
    assert_eq!(controller.raster().alpha_at(Point::new(40.0, 40.0)), 255);

    controller.tools_mut().set_mode(ToolMode::Eraser);
    controller.tools_mut().set_size(10.0);
    controller.pointer_down(Point::new(20.0, 40.0));
    controller.pointer_move(Point::new(60.0, 40.0));
    controller.pointer_up(Point::new(60.0, 40.0));

    assert_eq!(controller.raster().alpha_at(Point::new(40.0, 40.0)), 0);
    // Untouched neighbour
    assert_eq!(controller.raster().alpha_at(Point::new(80.0, 80.0)), 255);
}

#[test]
fn eraser_punches_through_background() {
    let mut controller = DrawingController::new(CanvasConfig::board()).unwrap();
    controller.tools_mut().set_mode(ToolMode::Eraser);
    controller.tools_mut().set_size(10.0);
    controller.pointer_down(Point::new(100.0, 310.0));
    controller.pointer_move(Point::new(200.0, 310.0));
    controller.pointer_up(Point::new(200.0, 310.0));

    assert_eq!(controller.raster().pixel(150, 310), Some([0, 0, 0, 0]));
    assert_eq!(controller.raster().pixel(150, 330), Some([0x1A, 0x1A, 0x2E, 255]));
}
