//! Thread-safe handle for hosts that drive one board from several threads.
//!
//! Every call runs inside a single lock, so no observer ever sees a
//! permutation that disagrees with the reported session state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::clock::{Clock, SystemClock};
use crate::engine::PuzzleEngine;
use crate::error::MoveOutcome;
use crate::types::{EngineSnapshot, Position};

pub struct SharedEngine<C: Clock = SystemClock> {
    inner: Arc<Mutex<PuzzleEngine<C>>>,
}

impl<C: Clock> Clone for SharedEngine<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedEngine<C> {
    pub fn new(engine: PuzzleEngine<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    // Engine calls never leave it half-updated, so a poisoned lock still
    // guards a consistent board.
    fn lock(&self) -> MutexGuard<'_, PuzzleEngine<C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut PuzzleEngine<C>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn start(&self) -> bool {
        self.lock().start()
    }

    pub fn apply_move(&self, a: Position, b: Position) -> MoveOutcome {
        self.lock().apply_move(a, b)
    }

    pub fn reset(&self) {
        self.lock().reset()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        self.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::rng::TileRng;
    use crate::types::{ImageRef, SessionState};
    use std::thread;

    #[test]
    fn test_concurrent_moves_all_counted() {
        let engine = PuzzleEngine::with_parts(
            5,
            ImageRef::new("img"),
            TileRng::from_seed(99),
            ManualClock::new(0),
        )
        .unwrap();
        let shared = SharedEngine::new(engine);
        assert!(shared.start());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let mut counted = 0u32;
                    for k in 0..50 {
                        let a = (t * 7 + k) % 25;
                        let b = (t * 3 + k * 11 + 1) % 25;
                        if shared.apply_move(a, b).is_counted() {
                            counted += 1;
                        }
                    }
                    counted
                })
            })
            .collect();

        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        let snap = shared.snapshot();
        assert_eq!(snap.moves, total);

        let mut tiles = snap.permutation.clone();
        tiles.sort_unstable();
        assert_eq!(tiles, (0..25).collect::<Vec<_>>());
        assert_eq!(snap.state == SessionState::Won, snap.permutation == tiles);
    }

    #[test]
    fn test_with_gives_exclusive_access() {
        let engine = PuzzleEngine::with_parts(
            3,
            ImageRef::default(),
            TileRng::from_seed(1),
            ManualClock::new(0),
        )
        .unwrap();
        let shared = SharedEngine::new(engine);
        let size = shared.with(|engine| {
            engine.set_grid_size(4).unwrap();
            engine.grid_size()
        });
        assert_eq!(size, 4);
        shared.reset();
        assert_eq!(shared.snapshot().permutation.len(), 16);
    }
}
