//! Scoring module - line-clear points, level and fall speed
//!
//! Everything here is a pure function of the lines-cleared history.
//!
//! Ordering contract: when rows are cleared, the lines counter is increased
//! **first** and the level multiplier is taken from the new total. Clearing
//! four rows with nine lines already on the counter is therefore scored at
//! level 2.

use std::time::Duration;

use getris_types::{GameError, LINES_PER_LEVEL};

/// Base points by number of rows cleared at once (index = rows, capped at 5).
pub const LINE_CLEAR_POINTS: [u32; 6] = [0, 100, 300, 500, 800, 1200];

/// `lines_cleared / 10 + 1`
pub fn level_for_lines(lines_cleared: u32) -> u32 {
    lines_cleared / LINES_PER_LEVEL + 1
}

/// Base points for clearing `rows` rows at once. Five or more rows score as
/// five.
pub fn line_clear_points(rows: usize) -> u32 {
    LINE_CLEAR_POINTS[rows.min(LINE_CLEAR_POINTS.len() - 1)]
}

/// Points for a clear of `rows` rows given the lines total *after* this clear
/// was added.
pub fn calculate_line_score(rows: usize, lines_after: u32) -> u32 {
    line_clear_points(rows).saturating_mul(level_for_lines(lines_after))
}

/// Raw drop interval in seconds: `(0.8 - L*0.007)^L * multiplier` with
/// `L = level - 1`.
///
/// Reproduced literally. The base turns non-positive at level 116, after
/// which the value is meaningless (and negative for odd `L`).
pub fn drop_interval_secs(level: u32, multiplier: f64) -> f64 {
    let l = level.saturating_sub(1) as f64;
    (0.8 - l * 0.007).powf(l) * multiplier
}

/// Drop interval as a [`Duration`].
///
/// Fails with [`GameError::DropIntervalUndefined`] once the base of the power
/// is no longer positive.
pub fn drop_interval(level: u32, multiplier: f64) -> Result<Duration, GameError> {
    let l = level.saturating_sub(1) as f64;
    if 0.8 - l * 0.007 <= 0.0 {
        return Err(GameError::DropIntervalUndefined { level });
    }
    let secs = drop_interval_secs(level, multiplier);
    if !secs.is_finite() || secs < 0.0 {
        return Err(GameError::DropIntervalUndefined { level });
    }
    Ok(Duration::from_secs_f64(secs))
}
