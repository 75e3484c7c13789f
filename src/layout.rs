//! Pixel layout helpers for the presentation layer.
//!
//! The engine only knows identities and positions. A tile is drawn by
//! showing the source image scaled to the whole board, offset so that the
//! identity's own square lands in the tile's box (CSS uses the negated
//! offsets as `background-position`).

use std::time::Duration;

use crate::types::{decode_index, GridSize, TileId};

/// Nominal board edge before clamping tile sizes.
pub const BOARD_PIXELS: f32 = 400.0;
pub const TILE_PIXELS_MIN: f32 = 60.0;
pub const TILE_PIXELS_MAX: f32 = 100.0;

/// Edge length of one tile, in CSS pixels.
pub fn tile_pixels(grid: GridSize) -> f32 {
    (BOARD_PIXELS / grid.get() as f32).clamp(TILE_PIXELS_MIN, TILE_PIXELS_MAX)
}

/// Edge length of the scaled source image behind every tile.
pub fn background_pixels(grid: GridSize) -> f32 {
    tile_pixels(grid) * grid.get() as f32
}

/// `(x, y)` pixel offset of `tile`'s square inside the scaled image.
///
/// Returns `None` for identities outside the board.
pub fn background_offset(grid: GridSize, tile: TileId) -> Option<(f32, f32)> {
    if tile >= grid.tile_count() {
        return None;
    }
    let (row, col) = decode_index(tile, grid.get());
    let size = tile_pixels(grid);
    Some((col as f32 * size, row as f32 * size))
}

/// Timer readout as zero-padded `MM:SS`. Minutes keep growing past 99.
pub fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
