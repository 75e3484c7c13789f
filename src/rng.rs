//! WASM-compatible random number generator for shuffling.
//!
//! Uses the `rand` crate with `SmallRng` (xoshiro256++). Entropy comes from
//! `getrandom`, which maps to `crypto.getRandomValues` in the browser.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seedable RNG driving the Fisher–Yates shuffle.
///
/// Seeded for deterministic replay in tests, entropy-seeded otherwise.
#[derive(Clone, Debug)]
pub struct TileRng {
    inner: SmallRng,
}

impl TileRng {
    /// Create from system entropy (browser crypto or OS).
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw from the closed range `[0, upper]`.
    #[inline(always)]
    pub fn up_to(&mut self, upper: usize) -> usize {
        self.inner.random_range(0..=upper)
    }
}

impl Default for TileRng {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_deterministic() {
        let mut rng1 = TileRng::from_seed(42);
        let mut rng2 = TileRng::from_seed(42);
        for _ in 0..100 {
            assert_eq!(rng1.up_to(1000), rng2.up_to(1000));
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let mut rng = TileRng::from_seed(123);
        let mut hit_upper = false;
        for _ in 0..1000 {
            let v = rng.up_to(3);
            assert!(v <= 3);
            hit_upper |= v == 3;
        }
        assert!(hit_upper);
        assert_eq!(rng.up_to(0), 0);
    }
}
