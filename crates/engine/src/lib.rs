//! Engine - the timed phase loop around the core rules
//!
//! `getris-core` knows how a piece moves and how rows are scored; this crate
//! knows *when*. A [`Simulation`] task owns the input receiver and walks the
//! phase state machine, taking the exclusive lock on a [`SharedGame`] for
//! each atomic step. Anything else (the render loop, tests) reads the same
//! `SharedGame` under the shared lock.
//!
//! # Example
//!
//! ```no_run
//! use getris_core::GameState;
//! use getris_engine::{SharedGame, Simulation, Timing};
//! use getris_types::{InputAction, InputEvent, LogicalInput};
//!
//! # async fn demo() {
//! let game = SharedGame::new(GameState::new(1).unwrap());
//! let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
//! let handle = Simulation::new(game.clone(), rx, Timing::default()).spawn();
//!
//! tx.send(InputEvent::new(LogicalInput::MoveLeft, InputAction::Down)).unwrap();
//! drop(tx);
//! handle.await.unwrap().unwrap();
//! assert!(game.is_done());
//! # }
//! ```

pub mod shared;
pub mod simulation;

pub use getris_core as core;
pub use getris_types as types;

pub use shared::SharedGame;
pub use simulation::{Simulation, Timing};
