//! Runtime configuration.
//!
//! Every field has a default equal to the reference constant, so an empty
//! TOML document (or no file at all) yields the stock game.

use std::time::Duration;

use serde::Deserialize;

use crate::{
    GameError, BOARD_COLS, BOARD_ROWS, BOARD_VISIBLE_ROWS, GENERATION_DELAY_MS, INPUT_POLL_MS,
    KEY_RELEASE_TIMEOUT_MS, LONG_PRESS_MS, MIN_BOARD_COLS, MIN_BOARD_ROWS, ROW_CLEAR_DELAY_MS,
    SOFT_DROP_MULTIPLIER, TRAIL_CLEAR_DELAY_MS,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Seed of the piece generator; drawn at random when absent.
    pub seed: Option<u32>,
    pub board_cols: usize,
    pub board_rows: usize,
    pub board_visible_rows: usize,
    pub generation_delay_ms: u64,
    pub row_clear_delay_ms: u64,
    pub trail_clear_delay_ms: u64,
    pub soft_drop_multiplier: f64,
    pub long_press_ms: u64,
    pub input_poll_ms: u64,
    /// Set to 0 when the terminal reports key releases.
    pub key_release_timeout_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            board_cols: BOARD_COLS,
            board_rows: BOARD_ROWS,
            board_visible_rows: BOARD_VISIBLE_ROWS,
            generation_delay_ms: GENERATION_DELAY_MS,
            row_clear_delay_ms: ROW_CLEAR_DELAY_MS,
            trail_clear_delay_ms: TRAIL_CLEAR_DELAY_MS,
            soft_drop_multiplier: SOFT_DROP_MULTIPLIER,
            long_press_ms: LONG_PRESS_MS,
            input_poll_ms: INPUT_POLL_MS,
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }
}

impl GameConfig {
    /// Reject board dimensions that cannot hold a piece at the spawn origin.
    ///
    /// A board too short spawns pieces above the grid where they never
    /// collide, so game over could not be detected.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.board_cols < MIN_BOARD_COLS || self.board_rows < MIN_BOARD_ROWS {
            return Err(GameError::BoardTooSmall {
                cols: self.board_cols,
                rows: self.board_rows,
                min_cols: MIN_BOARD_COLS,
                min_rows: MIN_BOARD_ROWS,
            });
        }
        Ok(())
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }

    pub fn row_clear_delay(&self) -> Duration {
        Duration::from_millis(self.row_clear_delay_ms)
    }

    pub fn trail_clear_delay(&self) -> Duration {
        Duration::from_millis(self.trail_clear_delay_ms)
    }

    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    pub fn input_poll(&self) -> Duration {
        Duration::from_millis(self.input_poll_ms)
    }

    pub fn key_release_timeout(&self) -> Option<Duration> {
        (self.key_release_timeout_ms > 0).then(|| Duration::from_millis(self.key_release_timeout_ms))
    }

    /// Visible rows never exceed the grid height.
    pub fn visible_rows(&self) -> usize {
        self.board_visible_rows.min(self.board_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg: GameConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.generation_delay(), Duration::from_millis(200));
        assert_eq!(cfg.row_clear_delay(), Duration::from_millis(75));
        assert_eq!(cfg.trail_clear_delay(), Duration::from_millis(50));
    }

    #[test]
    fn partial_document_overrides_only_given_keys() {
        let cfg: GameConfig = toml::from_str(
            r#"
            seed = 42
            generation_delay_ms = 10
            key_release_timeout_ms = 0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.generation_delay(), Duration::from_millis(10));
        assert_eq!(cfg.key_release_timeout(), None);
        assert_eq!(cfg.board_rows, BOARD_ROWS);
        assert_eq!(cfg.soft_drop_multiplier, SOFT_DROP_MULTIPLIER);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<GameConfig>("gravity = 3").is_err());
    }

    #[test]
    fn visible_rows_clamped_to_grid() {
        let cfg = GameConfig {
            board_rows: 21,
            board_visible_rows: 30,
            ..GameConfig::default()
        };
        assert_eq!(cfg.visible_rows(), 21);
    }

    #[test]
    fn default_board_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        let smallest = GameConfig {
            board_cols: MIN_BOARD_COLS,
            board_rows: MIN_BOARD_ROWS,
            ..GameConfig::default()
        };
        assert_eq!(smallest.validate(), Ok(()));
    }

    #[test]
    fn boards_below_the_spawn_area_are_rejected() {
        let short: GameConfig = toml::from_str("board_rows = 12").unwrap();
        assert_eq!(
            short.validate(),
            Err(GameError::BoardTooSmall {
                cols: BOARD_COLS,
                rows: 12,
                min_cols: 8,
                min_rows: 22,
            })
        );

        let narrow: GameConfig = toml::from_str("board_cols = 6").unwrap();
        assert!(matches!(
            narrow.validate(),
            Err(GameError::BoardTooSmall { cols: 6, .. })
        ));
    }
}
