//! Dot-grid renderer.

use crate::raster::Raster;
use kolam_core::grid::GridConfig;

/// Regenerate the grid: clear the whole raster, paint the optional
/// background, then one marker per lattice point.
///
/// Returns the number of markers painted. Markers that fall completely
/// outside the raster are skipped and not counted. Calling this twice with
/// the same config yields the same raster.
pub fn render_grid(raster: &mut Raster, grid: &GridConfig) -> usize {
    raster.clear();
    if let Some(background) = grid.background {
        raster.fill(background);
    }

    let mut painted = 0;
    for point in grid.lattice_points(raster.size()) {
        if raster.fill_dot(point, grid.dot_radius, grid.dot_color) {
            painted += 1;
        }
    }
    let (cols, rows) = grid.dimensions(raster.size());
    log::debug!(
        "grid regenerated: {painted} dots ({cols}x{rows} @ {}px, {:?})",
        grid.dot_spacing,
        grid.extent
    );
    painted
}
