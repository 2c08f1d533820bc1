//! Render snapshot - a read-only copy of what a frame needs to draw

use getris_types::{PieceKind, Phase, QUEUE_SIZE};

use crate::board::Board;
use crate::game_state::queue_slot_origin;
use crate::tetromino::Tetromino;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub active: Option<Tetromino>,
    pub holding: Option<Tetromino>,
    pub queue: [Tetromino; QUEUE_SIZE],
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub done: bool,
}

impl GameSnapshot {
    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver | Phase::End)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut queue = [Tetromino::new(PieceKind::O, 0, 0); QUEUE_SIZE];
        for (i, slot) in queue.iter_mut().enumerate() {
            slot.set_origin(queue_slot_origin(i));
        }
        Self {
            board: Board::default(),
            active: None,
            holding: None,
            queue,
            phase: Phase::Generation,
            score: 0,
            level: 1,
            lines_cleared: 0,
            done: false,
        }
    }
}
