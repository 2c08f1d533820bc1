//! Simulation task - runs the phase state machine
//!
//! Each phase handler blocks (asynchronously) until its exit condition and
//! performs its board mutations under the exclusive lock, never holding the
//! lock across a sleep or an input receive.
//!
//! ```text
//! Generation ──► Falling ──► Lock ──► Completion ──► Generation
//!     │           │   ▲                                  ▲
//!     │           ▼   │                                  │
//!     │          Paused        Falling ──(hold, empty)───┘
//!     ▼
//!  GameOver ──► End
//! ```

use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

use getris_core::HoldOutcome;
use getris_types::{GameConfig, GameError, InputAction, InputEvent, LogicalInput, Phase};

use crate::shared::SharedGame;

/// Delays and multipliers driving the phase loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub generation_delay: Duration,
    pub row_clear_delay: Duration,
    pub trail_clear_delay: Duration,
    pub soft_drop_multiplier: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

impl From<&GameConfig> for Timing {
    fn from(config: &GameConfig) -> Self {
        Self {
            generation_delay: config.generation_delay(),
            row_clear_delay: config.row_clear_delay(),
            trail_clear_delay: config.trail_clear_delay(),
            soft_drop_multiplier: config.soft_drop_multiplier,
        }
    }
}

pub struct Simulation {
    game: SharedGame,
    inputs: UnboundedReceiver<InputEvent>,
    timing: Timing,
}

impl Simulation {
    pub fn new(game: SharedGame, inputs: UnboundedReceiver<InputEvent>, timing: Timing) -> Self {
        Self {
            game,
            inputs,
            timing,
        }
    }

    /// Run the phase loop on the current tokio runtime.
    pub fn spawn(self) -> JoinHandle<Result<(), GameError>> {
        tokio::spawn(self.run())
    }

    /// Run phases until `End`.
    ///
    /// Fails only when piece construction fails, in which case the game is
    /// marked done before the error is returned.
    pub async fn run(mut self) -> Result<(), GameError> {
        loop {
            let phase = self.game.phase();
            match phase {
                Phase::Generation => {
                    if let Err(err) = self.generation().await {
                        tracing::error!(%err, "cannot build the next piece");
                        self.game.write().finish();
                        return Err(err);
                    }
                }
                Phase::Falling => self.falling().await,
                Phase::Lock => {
                    self.game.write().lock();
                }
                Phase::Completion => self.completion().await,
                Phase::Paused => self.paused().await,
                Phase::GameOver => self.game_over().await,
                Phase::End => {
                    let mut state = self.game.write();
                    state.finish();
                    tracing::info!(score = state.score(), level = state.level(), "game ended");
                    return Ok(());
                }
            }
        }
    }

    async fn generation(&mut self) -> Result<(), GameError> {
        sleep(self.timing.generation_delay).await;
        self.game.write().generate()?;
        Ok(())
    }

    fn drop_interval(&self, multiplier: f64) -> Duration {
        let result = self.game.read().drop_interval(multiplier);
        match result {
            Ok(interval) => interval,
            Err(err) => {
                tracing::warn!(%err, "dropping without delay");
                Duration::ZERO
            }
        }
    }

    async fn falling(&mut self) {
        let mut interval = self.drop_interval(1.0);
        let timer = sleep(interval);
        tokio::pin!(timer);

        loop {
            tokio::select! {
                () = &mut timer => {
                    let moved = self.game.write().drop_tick();
                    if !moved {
                        return;
                    }
                    timer.as_mut().reset(Instant::now() + interval);
                }
                event = self.inputs.recv() => {
                    let Some(event) = event else {
                        tracing::info!("input closed while falling");
                        self.game.write().end();
                        return;
                    };

                    if event.input == LogicalInput::SoftDrop {
                        let multiplier = match event.action {
                            InputAction::Down => Some(self.timing.soft_drop_multiplier),
                            InputAction::Up => Some(1.0),
                            InputAction::Hold => None,
                        };
                        if let Some(multiplier) = multiplier {
                            interval = self.drop_interval(multiplier);
                            timer.as_mut().reset(Instant::now() + interval);
                        }
                        continue;
                    }

                    self.apply_falling_input(event);
                    if self.game.phase() != Phase::Falling {
                        return;
                    }
                }
            }
        }
    }

    /// Handle one non-soft-drop input during `Falling`.
    fn apply_falling_input(&self, event: InputEvent) {
        match (event.input, event.action) {
            (LogicalInput::Pause, InputAction::Up) => self.game.write().pause(),
            (LogicalInput::Hold, InputAction::Down) => {
                let outcome = self.game.write().hold();
                tracing::trace!(?outcome, "hold");
                if outcome == HoldOutcome::NeedsGeneration {
                    tracing::debug!("hold slot was empty, generating");
                }
            }
            (LogicalInput::MoveLeft, InputAction::Down) => {
                self.game.write().move_left();
            }
            (LogicalInput::MoveRight, InputAction::Down) => {
                self.game.write().move_right();
            }
            (LogicalInput::RotateCw, InputAction::Down) => {
                self.game.write().try_rotate(true);
            }
            (LogicalInput::RotateCcw, InputAction::Down) => {
                self.game.write().try_rotate(false);
            }
            (LogicalInput::HardDrop, InputAction::Down) => {
                let rows = self.game.write().hard_drop();
                tracing::trace!(rows, "hard drop");
                self.schedule_trail_clear();
            }
            _ => {}
        }
    }

    /// Clear the hard-drop trail after a short delay, concurrently with
    /// whatever phase comes next.
    fn schedule_trail_clear(&self) {
        let game = self.game.clone();
        let delay = self.timing.trail_clear_delay;
        tokio::spawn(async move {
            sleep(delay).await;
            game.write().clear_ghosts();
        });
    }

    async fn completion(&mut self) {
        let rows = self.game.write().mark_completed_rows();
        if rows.is_empty() {
            return;
        }

        // Leave the marked rows on screen for a moment.
        sleep(self.timing.row_clear_delay).await;
        self.game.write().remove_rows(&rows);
    }

    async fn paused(&mut self) {
        loop {
            match self.inputs.recv().await {
                Some(event) if event.is_release_of(LogicalInput::Pause) => {
                    self.game.write().resume();
                    return;
                }
                Some(_) => {}
                None => {
                    tracing::info!("input closed while paused");
                    self.game.write().end();
                    return;
                }
            }
        }
    }

    async fn game_over(&mut self) {
        let _ = self.inputs.recv().await;
        self.game.write().end();
    }
}
