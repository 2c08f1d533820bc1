//! Shared game state - one reader/writer lock around [`GameState`]
//!
//! The simulation task is the only writer. The render pass takes the shared
//! lock once per frame, copies what it needs and releases before drawing.
//! Guards are never held across an `.await`.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use getris_core::{GameSnapshot, GameState};
use getris_types::Phase;

#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<RwLock<GameState>>,
}

impl SharedGame {
    pub fn new(state: GameState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Shared lock. Keep the guard short-lived.
    pub fn read(&self) -> RwLockReadGuard<'_, GameState> {
        self.inner.read()
    }

    /// Exclusive lock, for the simulation task and its timers only.
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, GameState> {
        self.inner.write()
    }

    pub fn phase(&self) -> Phase {
        self.inner.read().phase()
    }

    pub fn is_done(&self) -> bool {
        self.inner.read().is_done()
    }

    /// Copy the render state into `out` under one shared lock.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.inner.read().snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.inner.read().snapshot()
    }
}
