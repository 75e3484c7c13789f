//! WebAssembly engine for the image tile-swap puzzle.
//!
//! The source image is cut into an N×N grid of tiles, the tiles are shuffled,
//! and the player swaps pairs until every tile is home. This crate owns that
//! state machine; the browser keeps rendering, uploads and dialogs, and talks
//! to the engine through the `PuzzleGame` class exported below.
//!
//! Positions and tile identities are flat row-major indices:
//! `index = row * size + col`.

pub mod board;
pub mod clock;
pub mod engine;
pub mod error;
pub mod layout;
pub mod rng;
pub mod shared;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::PuzzleEngine;
pub use error::{EngineError, IgnoredMove, MoveOutcome};
pub use rng::TileRng;
pub use shared::SharedEngine;
pub use types::{
    EngineSnapshot, GridSize, ImageRef, Permutation, Position, SessionState, SessionSummary,
    TileId, DEFAULT_GRID_SIZE, MIN_GRID_SIZE,
};

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use wasm_bindgen::prelude::*;

    use crate::engine::PuzzleEngine;
    use crate::layout;
    use crate::types::ImageRef;

    /// One puzzle board, owned by the page.
    #[wasm_bindgen]
    pub struct PuzzleGame {
        engine: PuzzleEngine,
    }

    #[wasm_bindgen]
    impl PuzzleGame {
        /// Build a solved, idle board. Throws if `gridSize < 2`.
        #[wasm_bindgen(constructor)]
        pub fn new(grid_size: usize, image_ref: String) -> Result<PuzzleGame, JsError> {
            let engine = PuzzleEngine::new(grid_size, ImageRef::from(image_ref))?;
            Ok(PuzzleGame { engine })
        }

        pub fn configure(&mut self, grid_size: usize, image_ref: String) -> Result<(), JsError> {
            self.engine.configure(grid_size, ImageRef::from(image_ref))?;
            Ok(())
        }

        #[wasm_bindgen(js_name = "setGridSize")]
        pub fn set_grid_size(&mut self, grid_size: usize) -> Result<(), JsError> {
            self.engine.set_grid_size(grid_size)?;
            Ok(())
        }

        #[wasm_bindgen(js_name = "setImage")]
        pub fn set_image(&mut self, image_ref: String) {
            self.engine.set_image(ImageRef::from(image_ref));
        }

        pub fn start(&mut self) -> bool {
            self.engine.start()
        }

        pub fn shuffle(&mut self) -> bool {
            self.engine.shuffle()
        }

        /// Swap two positions. Returns `"accepted"`, `"won"` or `"ignored"`.
        #[wasm_bindgen(js_name = "applyMove")]
        pub fn apply_move(&mut self, pos_a: usize, pos_b: usize) -> String {
            self.engine.apply_move(pos_a, pos_b).as_str().to_string()
        }

        pub fn reset(&mut self) {
            self.engine.reset();
        }

        #[wasm_bindgen(js_name = "isSolved")]
        pub fn is_solved(&self) -> bool {
            self.engine.is_solved()
        }

        /// `"idle"`, `"running"` or `"won"`.
        pub fn state(&self) -> String {
            self.engine.session_state().as_str().to_string()
        }

        pub fn moves(&self) -> u32 {
            self.engine.move_count()
        }

        #[wasm_bindgen(js_name = "elapsedMs")]
        pub fn elapsed_ms(&self) -> f64 {
            self.engine.elapsed().as_millis() as f64
        }

        /// Timer readout, `MM:SS`.
        #[wasm_bindgen(js_name = "elapsedLabel")]
        pub fn elapsed_label(&self) -> String {
            layout::format_clock(self.engine.elapsed())
        }

        #[wasm_bindgen(js_name = "gridSize")]
        pub fn grid_size(&self) -> usize {
            self.engine.grid_size()
        }

        #[wasm_bindgen(js_name = "imageRef")]
        pub fn image_ref(&self) -> String {
            self.engine.image().as_str().to_string()
        }

        /// `permutation[position] = tile identity`.
        pub fn permutation(&self) -> js_sys::Uint32Array {
            let tiles: Vec<u32> = self.engine.permutation().iter().map(|&t| t as u32).collect();
            let arr = js_sys::Uint32Array::new_with_length(tiles.len() as u32);
            arr.copy_from(&tiles);
            arr
        }

        /// Whole engine state as a plain JS object.
        pub fn snapshot(&self) -> Result<JsValue, JsError> {
            serde_wasm_bindgen::to_value(&self.engine.snapshot())
                .map_err(|err| JsError::new(&err.to_string()))
        }

        /// Tile edge in CSS pixels for the current grid.
        #[wasm_bindgen(js_name = "tileSize")]
        pub fn tile_size(&self) -> f32 {
            layout::tile_pixels(self.engine.grid())
        }

        /// Edge of the scaled source image behind every tile (CSS
        /// `background-size`).
        #[wasm_bindgen(js_name = "backgroundSize")]
        pub fn background_size(&self) -> f32 {
            layout::background_pixels(self.engine.grid())
        }

        /// Background offset `{ x, y }` for the tile shown at `position`,
        /// or `null` when the position is off the board.
        #[wasm_bindgen(js_name = "backgroundOffset")]
        pub fn background_offset(&self, position: usize) -> Result<JsValue, JsValue> {
            let offset = self
                .engine
                .tile_at(position)
                .and_then(|tile| layout::background_offset(self.engine.grid(), tile));
            match offset {
                Some((x, y)) => {
                    let obj = js_sys::Object::new();
                    js_sys::Reflect::set(&obj, &"x".into(), &x.into())?;
                    js_sys::Reflect::set(&obj, &"y".into(), &y.into())?;
                    Ok(obj.into())
                }
                None => Ok(JsValue::NULL),
            }
        }
    }
}
