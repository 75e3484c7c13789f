//! Puzzle state engine.
//!
//! Owns the permutation, move counter, session state and timer for one
//! board. The presentation layer forwards intents (`start`, `apply_move`,
//! `reset`) and reads state back after each call; nothing is pushed out.
//!
//! ```text
//! Idle --start--> Running --solving move--> Won --reset--> Idle
//!                    \------------reset-----------------> Idle
//! ```

use log::{debug, trace};
use std::time::Duration;

use crate::board::shuffle_tiles;
use crate::clock::{Clock, SystemClock};
use crate::error::{EngineError, IgnoredMove, MoveOutcome};
use crate::rng::TileRng;
use crate::types::{
    EngineSnapshot, GridSize, ImageRef, Permutation, Position, SessionState, SessionSummary,
    TileId,
};

pub struct PuzzleEngine<C: Clock = SystemClock> {
    grid: GridSize,
    image: ImageRef,
    tiles: Permutation,
    state: SessionState,
    moves: u32,
    started_at: Option<u64>,
    summary: Option<SessionSummary>,
    rng: TileRng,
    clock: C,
}

impl PuzzleEngine<SystemClock> {
    /// Engine on the wall clock with an entropy-seeded shuffle.
    pub fn new(grid_size: usize, image: ImageRef) -> Result<Self, EngineError> {
        Self::with_parts(grid_size, image, TileRng::new(), SystemClock)
    }
}

impl Default for PuzzleEngine<SystemClock> {
    fn default() -> Self {
        Self::from_grid(GridSize::DEFAULT, ImageRef::default(), TileRng::new(), SystemClock)
    }
}

impl<C: Clock> PuzzleEngine<C> {
    pub fn with_parts(
        grid_size: usize,
        image: ImageRef,
        rng: TileRng,
        clock: C,
    ) -> Result<Self, EngineError> {
        let grid = GridSize::new(grid_size)?;
        Ok(Self::from_grid(grid, image, rng, clock))
    }

    fn from_grid(grid: GridSize, image: ImageRef, rng: TileRng, clock: C) -> Self {
        Self {
            grid,
            image,
            tiles: Permutation::identity(grid),
            state: SessionState::Idle,
            moves: 0,
            started_at: None,
            summary: None,
            rng,
            clock,
        }
    }

    // ─── Configuration ──────────────────────────────────────────────────

    /// Rebuild the board for a new grid size and image.
    ///
    /// All-or-nothing: an invalid size leaves the engine untouched.
    pub fn configure(&mut self, grid_size: usize, image: ImageRef) -> Result<(), EngineError> {
        let grid = GridSize::new(grid_size)?;
        self.rebuild(grid, image);
        Ok(())
    }

    /// Difficulty change: same image, new grid.
    pub fn set_grid_size(&mut self, grid_size: usize) -> Result<(), EngineError> {
        let grid = GridSize::new(grid_size)?;
        let image = std::mem::take(&mut self.image);
        self.rebuild(grid, image);
        Ok(())
    }

    /// New image: same grid, fresh board.
    pub fn set_image(&mut self, image: ImageRef) {
        self.rebuild(self.grid, image);
    }

    fn rebuild(&mut self, grid: GridSize, image: ImageRef) {
        self.grid = grid;
        self.image = image;
        self.tiles = Permutation::identity(grid);
        self.clear_session();
        debug!(target: "engine", "action=configure grid={} tiles={}", grid, grid.tile_count());
    }

    fn clear_session(&mut self) {
        self.state = SessionState::Idle;
        self.moves = 0;
        self.started_at = None;
        self.summary = None;
    }

    // ─── Session control ────────────────────────────────────────────────

    /// Begin (or restart) a session: zero the counter, stamp the clock and
    /// scramble the board.
    ///
    /// Returns `false` without touching anything while `Won`; the result has
    /// to be dismissed with `reset` first.
    pub fn start(&mut self) -> bool {
        if self.state == SessionState::Won {
            trace!(target: "engine", "action=start ignored state=won");
            return false;
        }
        self.state = SessionState::Running;
        self.moves = 0;
        self.summary = None;
        self.started_at = Some(self.clock.now_ms());
        shuffle_tiles(&mut self.tiles, &mut self.rng);
        debug!(
            target: "engine",
            "action=start grid={} misplaced={}",
            self.grid,
            self.tiles.misplaced()
        );
        trace!(target: "engine", "board=\n{}", self.tiles);
        true
    }

    /// Re-scramble a running board. Moves and timer carry on.
    ///
    /// Idle and won boards stay solved, so this is a no-op outside `Running`.
    pub fn shuffle(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        shuffle_tiles(&mut self.tiles, &mut self.rng);
        debug!(target: "engine", "action=shuffle misplaced={}", self.tiles.misplaced());
        true
    }

    /// Swap the tiles at two positions and count the move.
    ///
    /// The swap, the counter bump and the win check happen together: a
    /// solving move returns `Won` and freezes the board in the same call.
    pub fn apply_move(&mut self, a: Position, b: Position) -> MoveOutcome {
        if let Err(reason) = self.check_move(a, b) {
            trace!(target: "engine", "action=move a={a} b={b} ignored=\"{reason}\"");
            return MoveOutcome::Ignored(reason);
        }

        self.tiles.swap(a, b);
        debug_assert!(self.tiles.is_bijection());
        self.moves = self.moves.saturating_add(1);
        trace!(target: "engine", "action=move a={a} b={b} moves={}", self.moves);

        if !self.tiles.is_identity() {
            return MoveOutcome::Accepted;
        }

        let summary = SessionSummary {
            moves: self.moves,
            elapsed_ms: self.running_ms(),
        };
        self.state = SessionState::Won;
        self.summary = Some(summary);
        debug!(
            target: "engine",
            "action=won moves={} elapsed_ms={}",
            summary.moves,
            summary.elapsed_ms
        );
        MoveOutcome::Won(summary)
    }

    fn check_move(&self, a: Position, b: Position) -> Result<(), IgnoredMove> {
        if self.state != SessionState::Running {
            return Err(IgnoredMove::NotRunning(self.state));
        }
        let tile_count = self.tiles.len();
        for position in [a, b] {
            if position >= tile_count {
                return Err(IgnoredMove::OutOfRange { position, tile_count });
            }
        }
        if a == b {
            return Err(IgnoredMove::SamePosition);
        }
        Ok(())
    }

    /// Back to the solved, idle board. Always succeeds.
    pub fn reset(&mut self) {
        self.tiles = Permutation::identity(self.grid);
        self.clear_session();
        debug!(target: "engine", "action=reset grid={}", self.grid);
    }

    // ─── Queries ────────────────────────────────────────────────────────

    pub fn is_solved(&self) -> bool {
        self.tiles.is_identity()
    }

    pub fn session_state(&self) -> SessionState {
        self.state
    }

    pub fn move_count(&self) -> u32 {
        self.moves
    }

    /// Time since `start`, frozen at the solving move, zero when idle.
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms())
    }

    fn elapsed_ms(&self) -> u64 {
        match self.state {
            SessionState::Idle => 0,
            SessionState::Running => self.running_ms(),
            SessionState::Won => self.summary.map_or(0, |s| s.elapsed_ms),
        }
    }

    fn running_ms(&self) -> u64 {
        self.started_at
            .map_or(0, |start| self.clock.now_ms().saturating_sub(start))
    }

    /// Final score, present only after a win.
    pub fn summary(&self) -> Option<SessionSummary> {
        self.summary
    }

    pub fn permutation(&self) -> &[TileId] {
        self.tiles.as_slice()
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn grid_size(&self) -> usize {
        self.grid.get()
    }

    pub fn tile_count(&self) -> usize {
        self.grid.tile_count()
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn tile_at(&self, position: Position) -> Option<TileId> {
        self.tiles.get(position)
    }

    pub fn position_of(&self, tile: TileId) -> Option<Position> {
        self.tiles.position_of(tile)
    }

    /// Tiles not yet in their home position.
    pub fn misplaced_count(&self) -> usize {
        self.tiles.misplaced()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            grid_size: self.grid,
            image: self.image.clone(),
            permutation: self.tiles.as_slice().to_vec(),
            state: self.state,
            moves: self.moves,
            elapsed_ms: self.elapsed_ms(),
            summary: self.summary,
        }
    }
}
