//! getris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so integration tests,
//! benches and the binary can write `getris::core::GameState` and friends
//! while the implementation lives in dedicated crates under `crates/`.

pub use getris_core as core;
pub use getris_engine as engine;
pub use getris_input as input;
pub use getris_term as term;
pub use getris_types as types;
