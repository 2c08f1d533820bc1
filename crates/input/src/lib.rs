//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events to [`crate::types::LogicalInput`] and turns
//! presses and releases into the `Down` / `Hold` / `Up` event stream the
//! simulation consumes. Nothing here knows about the game state.

pub mod forwarder;
pub mod map;

pub use getris_types as types;

pub use forwarder::{Forwarded, InputForwarder};
pub use map::{key_code, map_key, should_quit};
