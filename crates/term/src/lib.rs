//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget libraries and instead renders a [`GameSnapshot`] into a
//! simple framebuffer that is then flushed to the terminal.
//!
//! The render pass never touches the live game state: the frontend copies a
//! snapshot under the shared lock, releases it, and only then draws.
//!
//! [`GameSnapshot`]: crate::core::GameSnapshot

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use getris_core as core;
pub use getris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
