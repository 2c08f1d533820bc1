//! Error taxonomy of the simulation.
//!
//! Collisions and game over are ordinary control flow, not errors.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The random shape selector fell outside `0..7`.
    #[error("invalid tetromino shape selector {0}")]
    InvalidShape(u32),

    /// The drop interval base `0.8 - (level-1)*0.007` is no longer positive.
    #[error("drop interval is undefined at level {level}")]
    DropIntervalUndefined { level: u32 },

    /// The configured board cannot hold a piece at the spawn origin.
    #[error("board {cols}x{rows} is too small, need at least {min_cols}x{min_rows}")]
    BoardTooSmall {
        cols: usize,
        rows: usize,
        min_cols: usize,
        min_rows: usize,
    },
}
