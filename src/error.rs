//! Configuration errors and move rejections.

use crate::types::{Position, SessionState, SessionSummary};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("grid size must be at least 2, got {grid_size}")]
    InvalidConfiguration { grid_size: usize },
}

/// Why `apply_move` left the board untouched. Not an error: the
/// presentation layer is expected to gate gestures, so these are silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IgnoredMove {
    #[error("both positions are the same")]
    SamePosition,
    #[error("position {position} is outside a board of {tile_count} tiles")]
    OutOfRange { position: Position, tile_count: usize },
    #[error("moves are not accepted while {0}")]
    NotRunning(SessionState),
}

/// Result of forwarding one swap gesture to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Tiles swapped and counted; the board is still scrambled.
    Accepted,
    /// Tiles swapped and counted; this move solved the board.
    Won(SessionSummary),
    Ignored(IgnoredMove),
}

impl MoveOutcome {
    pub fn is_counted(&self) -> bool {
        !matches!(self, MoveOutcome::Ignored(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveOutcome::Accepted => "accepted",
            MoveOutcome::Won(_) => "won",
            MoveOutcome::Ignored(_) => "ignored",
        }
    }
}
