//! Press / long-press / release detection for terminal key events.
//!
//! Supports terminals that do not emit key release events by using a timeout.
//! Terminal auto-repeat is folded into the original press: a repeated press of
//! a key that is already down only refreshes its release timer.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::{key_code, map_key};
use crate::types::{GameConfig, InputAction, InputEvent, LogicalInput};

/// Keys tracked at once. A further press releases the oldest tracked key.
const MAX_PRESSED: usize = 8;

/// Events produced by one call into the forwarder.
pub type Forwarded = ArrayVec<InputEvent, MAX_PRESSED>;

#[derive(Debug, Clone, Copy)]
struct PressedKey {
    code: KeyCode,
    input: LogicalInput,
    pressed_at: Instant,
    last_seen: Instant,
    hold_sent: bool,
}

impl PressedKey {
    fn event(&self, action: InputAction) -> InputEvent {
        InputEvent::new(self.input, action).with_key_code(key_code(self.code))
    }
}

/// Turns raw key presses and releases into `Down`, `Hold` and `Up` events.
#[derive(Debug, Clone)]
pub struct InputForwarder {
    pressed: ArrayVec<PressedKey, MAX_PRESSED>,
    long_press: Duration,
    /// `None` when the terminal reports releases itself.
    release_timeout: Option<Duration>,
}

impl InputForwarder {
    pub fn new(long_press: Duration, release_timeout: Option<Duration>) -> Self {
        Self {
            pressed: ArrayVec::new(),
            long_press,
            release_timeout,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.long_press(), config.key_release_timeout())
    }

    /// Stop synthesizing releases. Use once the terminal is known to report
    /// them.
    pub fn with_release_events(mut self) -> Self {
        self.release_timeout = None;
        self
    }

    pub fn long_press(&self) -> Duration {
        self.long_press
    }

    pub fn release_timeout(&self) -> Option<Duration> {
        self.release_timeout
    }

    /// Number of keys currently considered down.
    pub fn pressed_len(&self) -> usize {
        self.pressed.len()
    }

    pub fn press(&mut self, code: KeyCode, now: Instant) -> Forwarded {
        let mut out = Forwarded::new();
        let Some(input) = map_key(code) else {
            return out;
        };

        if let Some(key) = self.pressed.iter_mut().find(|k| k.code == code) {
            key.last_seen = now;
            return out;
        }

        let key = PressedKey {
            code,
            input,
            pressed_at: now,
            last_seen: now,
            hold_sent: false,
        };
        if self.pressed.is_full() {
            let oldest = self.pressed.remove(0);
            out.push(oldest.event(InputAction::Up));
        }
        out.push(key.event(InputAction::Down));
        self.pressed.push(key);
        out
    }

    pub fn release(&mut self, code: KeyCode, _now: Instant) -> Forwarded {
        let mut out = Forwarded::new();
        if let Some(pos) = self.pressed.iter().position(|k| k.code == code) {
            let key = self.pressed.remove(pos);
            out.push(key.event(InputAction::Up));
        }
        out
    }

    /// Emit pending long-press and timed-out release events.
    pub fn tick(&mut self, now: Instant) -> Forwarded {
        let mut out = Forwarded::new();
        let long_press = self.long_press;
        let timeout = self.release_timeout;

        self.pressed.retain(|key| {
            if let Some(timeout) = timeout {
                if now.saturating_duration_since(key.last_seen) > timeout {
                    out.push(key.event(InputAction::Up));
                    return false;
                }
            }
            if !key.hold_sent && now.saturating_duration_since(key.pressed_at) >= long_press {
                key.hold_sent = true;
                out.push(key.event(InputAction::Hold));
            }
            true
        });
        out
    }

    /// Forget every pressed key without emitting anything.
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}

impl Default for InputForwarder {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LONG_PRESS_MS;

    fn actions(events: &Forwarded) -> Vec<(LogicalInput, InputAction)> {
        events.iter().map(|e| (e.input, e.action)).collect()
    }

    #[test]
    fn test_press_then_release() {
        let t0 = Instant::now();
        let mut fw = InputForwarder::new(Duration::from_millis(300), None);

        let out = fw.press(KeyCode::Left, t0);
        assert_eq!(actions(&out), vec![(LogicalInput::MoveLeft, InputAction::Down)]);
        assert_eq!(out[0].key_code, key_code(KeyCode::Left));

        assert!(fw.tick(t0 + Duration::from_millis(100)).is_empty());

        let out = fw.release(KeyCode::Left, t0 + Duration::from_millis(120));
        assert_eq!(actions(&out), vec![(LogicalInput::MoveLeft, InputAction::Up)]);
        assert_eq!(fw.pressed_len(), 0);
    }

    #[test]
    fn test_long_press_emits_one_hold() {
        let t0 = Instant::now();
        let mut fw = InputForwarder::new(Duration::from_millis(300), None);

        fw.press(KeyCode::Char('c'), t0);
        assert!(fw.tick(t0 + Duration::from_millis(299)).is_empty());

        let out = fw.tick(t0 + Duration::from_millis(300));
        assert_eq!(actions(&out), vec![(LogicalInput::Hold, InputAction::Hold)]);

        assert!(fw.tick(t0 + Duration::from_millis(900)).is_empty());
        let out = fw.release(KeyCode::Char('c'), t0 + Duration::from_millis(1000));
        assert_eq!(actions(&out), vec![(LogicalInput::Hold, InputAction::Up)]);
    }

    #[test]
    fn test_auto_repeat_is_not_a_new_press() {
        let t0 = Instant::now();
        let mut fw = InputForwarder::new(Duration::from_millis(300), None);

        assert_eq!(fw.press(KeyCode::Down, t0).len(), 1);
        assert!(fw.press(KeyCode::Down, t0 + Duration::from_millis(30)).is_empty());
        assert!(fw.press(KeyCode::Down, t0 + Duration::from_millis(60)).is_empty());
        assert_eq!(fw.pressed_len(), 1);
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let t0 = Instant::now();
        let mut fw = InputForwarder::new(
            Duration::from_millis(300),
            Some(Duration::from_millis(150)),
        );

        fw.press(KeyCode::Right, t0);
        // Repeats keep the key alive.
        fw.press(KeyCode::Right, t0 + Duration::from_millis(100));
        assert!(fw.tick(t0 + Duration::from_millis(200)).is_empty());

        let out = fw.tick(t0 + Duration::from_millis(251));
        assert_eq!(actions(&out), vec![(LogicalInput::MoveRight, InputAction::Up)]);
        assert_eq!(fw.pressed_len(), 0);

        // A release after the synthesized one is ignored.
        assert!(fw.release(KeyCode::Right, t0 + Duration::from_millis(260)).is_empty());
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let t0 = Instant::now();
        let mut fw = InputForwarder::default();
        assert!(fw.press(KeyCode::Char('p'), t0).is_empty());
        assert!(fw.release(KeyCode::Char('p'), t0).is_empty());
        assert_eq!(fw.pressed_len(), 0);
    }

    #[test]
    fn test_keys_are_tracked_independently() {
        let t0 = Instant::now();
        let mut fw = InputForwarder::new(Duration::from_millis(300), None);

        fw.press(KeyCode::Left, t0);
        fw.press(KeyCode::Down, t0 + Duration::from_millis(200));

        let out = fw.tick(t0 + Duration::from_millis(350));
        assert_eq!(actions(&out), vec![(LogicalInput::MoveLeft, InputAction::Hold)]);

        let out = fw.tick(t0 + Duration::from_millis(500));
        assert_eq!(actions(&out), vec![(LogicalInput::SoftDrop, InputAction::Hold)]);
    }

    #[test]
    fn test_full_table_releases_oldest_key() {
        let t0 = Instant::now();
        let mut fw = InputForwarder::new(Duration::from_millis(300), None);

        let keys = ['4', '6', '7', '9', 'c', 'x', 'z', '8'];
        for key in keys {
            assert_eq!(fw.press(KeyCode::Char(key), t0).len(), 1);
        }
        assert_eq!(fw.pressed_len(), MAX_PRESSED);

        let out = fw.press(KeyCode::Down, t0 + Duration::from_millis(10));
        assert_eq!(
            actions(&out),
            vec![
                (LogicalInput::MoveLeft, InputAction::Up),
                (LogicalInput::SoftDrop, InputAction::Down),
            ]
        );
        assert_eq!(out[0].key_code, key_code(KeyCode::Char('4')));
        assert_eq!(fw.pressed_len(), MAX_PRESSED);

        // The newest key is tracked and gets its release.
        let out = fw.release(KeyCode::Down, t0 + Duration::from_millis(20));
        assert_eq!(actions(&out), vec![(LogicalInput::SoftDrop, InputAction::Up)]);
        assert!(fw.release(KeyCode::Char('4'), t0 + Duration::from_millis(30)).is_empty());
    }

    #[test]
    fn test_with_release_events_disables_timeout() {
        let fw = InputForwarder::default();
        assert!(fw.release_timeout().is_some());
        assert_eq!(fw.long_press(), Duration::from_millis(LONG_PRESS_MS));
        assert!(fw.with_release_events().release_timeout().is_none());
    }
}
