//! Game state module - the single mutable aggregate of a game
//!
//! `GameState` owns the board, the active/holding/queued pieces, the score
//! and the current [`Phase`]. Its methods are the atomic mutations the phase
//! loop performs; each one is meant to run under a single exclusive lock
//! acquisition, so a reader never sees half of a move, a lock or a row
//! shift. Timing (delays, the drop timer) is not modelled here.
//!
//! Every movement follows the same pattern: mutate optimistically, test for
//! collision, and undo exactly that mutation on collision.

use std::time::Duration;

use getris_types::{
    GameConfig, GameError, Phase, PieceKind, HOLDING_ORIGIN, QUEUE_ORIGIN, QUEUE_SIZE,
    QUEUE_SLOT_HEIGHT, SPAWN_ORIGIN,
};

use crate::board::Board;
use crate::rng::SimpleRng;
use crate::scoring::{calculate_line_score, drop_interval, level_for_lines};
use crate::snapshot::GameSnapshot;
use crate::tetromino::Tetromino;

/// Result of a hold request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// The previously held piece became active at the spawn origin.
    Swapped,
    /// The hold slot was empty; a new piece must be generated.
    NeedsGeneration,
    /// No active piece to hold.
    Ignored,
}

/// Display origin of queue slot `index` (0 = next, drawn on top).
pub fn queue_slot_origin(index: usize) -> (i32, i32) {
    let from_bottom = (QUEUE_SIZE - 1 - index.min(QUEUE_SIZE - 1)) as i32;
    (QUEUE_ORIGIN.0, QUEUE_ORIGIN.1 + from_bottom * QUEUE_SLOT_HEIGHT)
}

#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    holding: Option<Tetromino>,
    /// Upcoming pieces, index 0 spawns next.
    queue: [Tetromino; QUEUE_SIZE],
    phase: Phase,
    lines_cleared: u32,
    score: u32,
    done: bool,
    rng: SimpleRng,
    seed: u32,
}

impl GameState {
    /// New game on the reference 10x40 board.
    pub fn new(seed: u32) -> Result<Self, GameError> {
        Self::with_board(Board::default(), seed)
    }

    /// New game using the board dimensions from `config`.
    ///
    /// Fails with [`GameError::BoardTooSmall`] when the board cannot hold a
    /// spawned piece.
    pub fn from_config(config: &GameConfig, seed: u32) -> Result<Self, GameError> {
        config.validate()?;
        Self::with_board(Board::new(config.board_cols, config.board_rows), seed)
    }

    /// New game on a caller-provided board (which may already hold cells).
    pub fn with_board(board: Board, seed: u32) -> Result<Self, GameError> {
        let mut rng = SimpleRng::new(seed);
        let mut queue = [Tetromino::new(PieceKind::O, 0, 0); QUEUE_SIZE];
        for (i, slot) in queue.iter_mut().enumerate() {
            let (x, y) = queue_slot_origin(i);
            *slot = Tetromino::random(&mut rng, x, y)?;
        }

        tracing::info!(seed, cols = board.cols(), rows = board.rows(), "new game");

        Ok(Self {
            board,
            active: None,
            holding: None,
            queue,
            phase: Phase::Generation,
            lines_cleared: 0,
            score: 0,
            done: false,
            rng,
            seed,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Replace the active piece (scenario setup).
    pub fn set_active(&mut self, piece: Option<Tetromino>) {
        self.active = piece;
    }

    pub fn holding(&self) -> Option<Tetromino> {
        self.holding
    }

    pub fn queue(&self) -> &[Tetromino; QUEUE_SIZE] {
        &self.queue
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Derived from the lines counter, never stored.
    pub fn level(&self) -> u32 {
        level_for_lines(self.lines_cleared)
    }

    /// Drop interval at the current level.
    pub fn drop_interval(&self, multiplier: f64) -> Result<Duration, GameError> {
        drop_interval(self.level(), multiplier)
    }

    fn set_phase(&mut self, next: Phase) {
        if self.phase != next {
            tracing::debug!(from = self.phase.as_str(), to = next.as_str(), "phase transition");
            self.phase = next;
        }
    }

    /// Generation: pop the queue head into the active slot at the spawn
    /// origin, shift the queue forward and append a fresh random piece.
    ///
    /// Moves to `GameOver` when the new piece collides immediately, otherwise
    /// to `Falling`. Returns the new phase.
    pub fn generate(&mut self) -> Result<Phase, GameError> {
        let mut next = self.queue[0];
        next.set_origin(SPAWN_ORIGIN);

        self.queue.rotate_left(1);
        let (x, y) = queue_slot_origin(QUEUE_SIZE - 1);
        self.queue[QUEUE_SIZE - 1] = Tetromino::random(&mut self.rng, x, y)?;
        for (i, slot) in self.queue.iter_mut().enumerate() {
            slot.set_origin(queue_slot_origin(i));
        }

        let blocked = next.collides(&self.board);
        self.active = Some(next);

        if blocked {
            tracing::info!(score = self.score, lines = self.lines_cleared, "game over");
            self.set_phase(Phase::GameOver);
        } else {
            tracing::trace!(kind = next.kind.as_str(), "spawned");
            self.set_phase(Phase::Falling);
        }
        Ok(self.phase)
    }

    /// Translate the active piece. Returns false (and leaves it untouched)
    /// on collision or when there is no active piece.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        piece.origin_x += dx;
        piece.origin_y += dy;
        if piece.collides(&self.board) {
            piece.origin_x -= dx;
            piece.origin_y -= dy;
            return false;
        }
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    pub fn move_down(&mut self) -> bool {
        self.try_move(0, -1)
    }

    /// Rotate the active piece about its origin. A colliding rotation is
    /// undone by the inverse rotation; there are no wall kicks.
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };

        if clockwise {
            piece.rotate_clockwise();
        } else {
            piece.rotate_counter_clockwise();
        }

        if piece.collides(&self.board) {
            if clockwise {
                piece.rotate_counter_clockwise();
            } else {
                piece.rotate_clockwise();
            }
            return false;
        }
        true
    }

    /// One drop-timer tick. A blocked down-move moves the game to `Lock`.
    pub fn drop_tick(&mut self) -> bool {
        let moved = self.move_down();
        if !moved {
            self.set_phase(Phase::Lock);
        }
        moved
    }

    /// Drop the active piece as far as it goes, leaving a ghost trail on
    /// every cell it passes through, then move to `Lock`.
    ///
    /// Returns the number of rows dropped. The trail is cleared later by
    /// [`GameState::clear_ghosts`].
    pub fn hard_drop(&mut self) -> u32 {
        let mut rows = 0;
        if let Some(piece) = self.active.as_mut() {
            loop {
                piece.origin_y -= 1;
                if piece.collides(&self.board) {
                    piece.origin_y += 1;
                    break;
                }
                piece.commit_trail_to_board(&mut self.board);
                rows += 1;
            }
        }
        self.set_phase(Phase::Lock);
        rows
    }

    /// Swap the active and held pieces.
    ///
    /// The piece going into the hold slot is placed at the holding origin.
    /// A piece coming out of it is placed at the spawn origin and play
    /// continues in `Falling`; if the slot was empty the game moves to
    /// `Generation` to produce a new active piece.
    pub fn hold(&mut self) -> HoldOutcome {
        let Some(mut outgoing) = self.active.take() else {
            return HoldOutcome::Ignored;
        };

        outgoing.set_origin(HOLDING_ORIGIN);
        let incoming = self.holding.replace(outgoing);

        match incoming {
            Some(mut piece) => {
                piece.set_origin(SPAWN_ORIGIN);
                self.active = Some(piece);
                HoldOutcome::Swapped
            }
            None => {
                self.set_phase(Phase::Generation);
                HoldOutcome::NeedsGeneration
            }
        }
    }

    /// Lock: commit the active piece to the board and clear the active
    /// slot, then move to `Completion`.
    pub fn lock(&mut self) {
        if let Some(piece) = self.active.take() {
            piece.commit_to_board(&mut self.board);
        }
        self.set_phase(Phase::Completion);
    }

    /// First half of Completion: scan rows bottom to top, mark every full
    /// row for deletion, and score the clear.
    ///
    /// The lines counter is increased before the level multiplier is taken.
    /// Returns the marked rows in ascending order; when none are found the
    /// game moves straight to `Generation`.
    pub fn mark_completed_rows(&mut self) -> Vec<usize> {
        let rows: Vec<usize> = (0..self.board.rows())
            .filter(|&y| self.board.is_row_complete(y))
            .collect();

        if rows.is_empty() {
            self.set_phase(Phase::Generation);
            return rows;
        }

        for &y in &rows {
            self.board.mark_row_for_deletion(y);
        }

        self.lines_cleared += rows.len() as u32;
        let points = calculate_line_score(rows.len(), self.lines_cleared);
        self.score = self.score.saturating_add(points);

        tracing::info!(
            rows = rows.len(),
            points,
            score = self.score,
            level = self.level(),
            "rows cleared"
        );
        rows
    }

    /// Second half of Completion: remove the marked rows, bottom-most
    /// first, then move to `Generation`.
    ///
    /// `rows` must be ascending. Each removal shifts everything above it
    /// down by one, so later indices are adjusted by the removals already
    /// done.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        for (removed, &y) in rows.iter().enumerate() {
            self.board.remove_row(y - removed);
        }
        self.set_phase(Phase::Generation);
    }

    /// Clear every ghost flag on the board.
    pub fn clear_ghosts(&mut self) {
        self.board.clear_ghosts();
    }

    /// Falling -> Paused. Ignored from any other phase.
    pub fn pause(&mut self) {
        if self.phase == Phase::Falling {
            self.set_phase(Phase::Paused);
        }
    }

    /// Paused -> Falling. Ignored from any other phase.
    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.set_phase(Phase::Falling);
        }
    }

    /// Move to `End` from wherever the game is.
    pub fn end(&mut self) {
        self.set_phase(Phase::End);
    }

    /// End: mark the game done.
    pub fn finish(&mut self) {
        self.set_phase(Phase::End);
        self.done = true;
    }

    /// Copy everything the render pass needs into `out`.
    ///
    /// Reuses the board allocation already in `out`.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board.clone_from(&self.board);
        out.active = self.active;
        out.holding = self.holding;
        out.queue = self.queue;
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level();
        out.lines_cleared = self.lines_cleared;
        out.done = self.done;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
