//! Key mapping from terminal events to logical inputs.

use crate::types::LogicalInput;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the logical input it drives.
///
/// Digits mirror a numeric keypad layout, so the game is playable with the
/// keypad alone.
pub fn map_key(code: KeyCode) -> Option<LogicalInput> {
    match code {
        KeyCode::Esc | KeyCode::F(1) => Some(LogicalInput::Pause),

        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('0') => Some(LogicalInput::Hold),

        // Rotation
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('7') | KeyCode::Char('3') => {
            Some(LogicalInput::RotateCcw)
        }
        KeyCode::Up
        | KeyCode::Char('x')
        | KeyCode::Char('X')
        | KeyCode::Char('1')
        | KeyCode::Char('5')
        | KeyCode::Char('9') => Some(LogicalInput::RotateCw),

        // Drops
        KeyCode::Char(' ') | KeyCode::Char('8') => Some(LogicalInput::HardDrop),
        KeyCode::Down | KeyCode::Char('2') => Some(LogicalInput::SoftDrop),

        // Movement
        KeyCode::Left | KeyCode::Char('4') => Some(LogicalInput::MoveLeft),
        KeyCode::Right | KeyCode::Char('6') => Some(LogicalInput::MoveRight),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Numeric code carried in [`crate::types::InputEvent::key_code`].
///
/// Characters keep their scalar value; named keys live above the Unicode
/// range.
pub fn key_code(code: KeyCode) -> u32 {
    const NAMED: u32 = 0x0011_0000;
    match code {
        KeyCode::Char(c) => c as u32,
        KeyCode::F(n) => NAMED + 0x100 + u32::from(n),
        KeyCode::Esc => NAMED + 1,
        KeyCode::Enter => NAMED + 2,
        KeyCode::Backspace => NAMED + 3,
        KeyCode::Tab => NAMED + 4,
        KeyCode::Left => NAMED + 5,
        KeyCode::Right => NAMED + 6,
        KeyCode::Up => NAMED + 7,
        KeyCode::Down => NAMED + 8,
        _ => NAMED,
    }
}
