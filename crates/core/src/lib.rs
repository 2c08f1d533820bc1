//! Core game logic - pure, synchronous and testable
//!
//! This crate holds the rules of the game and nothing else: no timers, no
//! locks, no I/O. The phase loop in `getris-engine` drives it.
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size cell grid, row 0 at the bottom
//! - [`pieces`]: the seven constant shapes
//! - [`tetromino`]: one piece; traversal, collision, commit and rotation
//! - [`rng`]: seeded LCG for uniform shape selection
//! - [`scoring`]: points, level and drop interval as pure functions
//! - [`game_state`]: the mutable aggregate and its atomic phase steps
//! - [`snapshot`]: read-only copy handed to the render pass
//!
//! # Example
//!
//! ```
//! use getris_core::GameState;
//! use getris_types::Phase;
//!
//! let mut game = GameState::new(12345).unwrap();
//! assert_eq!(game.phase(), Phase::Generation);
//!
//! // Spawn the first piece and push it around.
//! assert_eq!(game.generate().unwrap(), Phase::Falling);
//! game.move_left();
//! game.try_rotate(true);
//!
//! game.hard_drop();
//! assert_eq!(game.phase(), Phase::Lock);
//! game.lock();
//! assert!(game.mark_completed_rows().is_empty());
//! assert_eq!(game.phase(), Phase::Generation);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tetromino;

pub use getris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell};
pub use game_state::{queue_slot_origin, GameState, HoldOutcome};
pub use pieces::{get_shape, CellOffset, PieceShape};
pub use rng::SimpleRng;
pub use scoring::{calculate_line_score, drop_interval, drop_interval_secs, level_for_lines};
pub use snapshot::GameSnapshot;
pub use tetromino::Tetromino;
