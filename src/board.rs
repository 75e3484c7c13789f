//! Board scrambling.
//!
//! The shuffle works on the abstract permutation only; it never counts as a
//! player move and never checks for a win. It can land on the solved
//! arrangement, which is left as is.

use crate::rng::TileRng;
use crate::types::Permutation;

/// Fisher–Yates: walk from the last position down to 1, swapping each
/// position with a uniformly drawn one in `[0, i]`.
pub fn shuffle_tiles(tiles: &mut Permutation, rng: &mut TileRng) {
    for i in (1..tiles.len()).rev() {
        let j = rng.up_to(i);
        if i != j {
            tiles.swap(i, j);
        }
    }
    debug_assert!(tiles.is_bijection());
}
