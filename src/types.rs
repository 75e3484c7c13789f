//! Core data types for the tile-swap puzzle.
//!
//! Positions and tile identities share one flat row-major layout:
//! `index = row * size + col`, so tile `t` belongs at position `t`.

use crate::error::EngineError;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Smallest accepted grid edge. A 1×1 board has nothing to swap.
pub const MIN_GRID_SIZE: usize = 2;

/// Grid edge used until the player picks a difficulty.
pub const DEFAULT_GRID_SIZE: usize = 4;

/// Linear slot index on the board, `0..size²`.
pub type Position = usize;

/// Which sub-region of the source image a tile shows, `0..size²`.
pub type TileId = usize;

/// Decode a linear index back to (row, col).
#[inline(always)]
pub fn decode_index(index: usize, size: usize) -> (usize, usize) {
    (index / size, index % size)
}

/// Validated grid edge length (N in an N×N board).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GridSize(usize);

impl GridSize {
    pub const DEFAULT: GridSize = GridSize(DEFAULT_GRID_SIZE);

    pub fn new(size: usize) -> Result<Self, EngineError> {
        if size < MIN_GRID_SIZE {
            return Err(EngineError::InvalidConfiguration { grid_size: size });
        }
        Ok(Self(size))
    }

    #[inline(always)]
    pub fn get(self) -> usize {
        self.0
    }

    /// Number of tiles (and positions) on the board.
    #[inline(always)]
    pub fn tile_count(self) -> usize {
        self.0 * self.0
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// Opaque handle to the decoded source image (object URL or data URL).
///
/// The engine stores it so the presentation layer can re-slice tiles after
/// reconfiguration, but never looks inside.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(src: impl Into<String>) -> Self {
        Self(src.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ImageRef {
    fn from(src: String) -> Self {
        Self(src)
    }
}

/// Assignment of tile identities to board positions.
///
/// `cells[position] = tile`. Always a bijection on `0..size²`: every
/// mutation is a transposition, and the only constructor is the identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    size: usize,
    cells: Vec<TileId>,
}

impl Permutation {
    /// The solved arrangement: every tile at its home position.
    pub fn identity(grid: GridSize) -> Self {
        Self {
            size: grid.get(),
            cells: (0..grid.tile_count()).collect(),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, position: Position) -> Option<TileId> {
        self.cells.get(position).copied()
    }

    /// Exchange the tiles at two positions. Both must be in range.
    #[inline(always)]
    pub fn swap(&mut self, a: Position, b: Position) {
        self.cells.swap(a, b);
    }

    pub fn as_slice(&self) -> &[TileId] {
        &self.cells
    }

    /// Where tile `tile` currently sits.
    pub fn position_of(&self, tile: TileId) -> Option<Position> {
        self.cells.iter().position(|&t| t == tile)
    }

    pub fn is_identity(&self) -> bool {
        self.cells.iter().enumerate().all(|(pos, &tile)| pos == tile)
    }

    /// Count of positions holding a tile that belongs elsewhere.
    pub fn misplaced(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(pos, &tile)| pos != tile)
            .count()
    }

    /// True when the cells cover `0..len` exactly once each.
    pub fn is_bijection(&self) -> bool {
        let mut seen = vec![false; self.cells.len()];
        for &tile in &self.cells {
            match seen.get_mut(tile) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            for &tile in row {
                write!(f, "{:3}", tile)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Lifecycle of one play session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Board shown solved, moves refused.
    #[default]
    Idle,
    /// Shuffled board, moves counted, timer live.
    Running,
    /// Solved by the player. Frozen until reset.
    Won,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Won => "won",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final score, captured in the same call that solves the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub moves: u32,
    pub elapsed_ms: u64,
}

impl SessionSummary {
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }
}

/// Read-only view of the whole engine, handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub grid_size: GridSize,
    pub image: ImageRef,
    pub permutation: Vec<TileId>,
    pub state: SessionState,
    pub moves: u32,
    pub elapsed_ms: u64,
    pub summary: Option<SessionSummary>,
}
