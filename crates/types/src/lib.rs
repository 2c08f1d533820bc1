//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the simulation, the render pass
//! and the input boundary alike.
//!
//! # Board Geometry
//!
//! Row 0 is the **bottom** of the board and y grows upwards. The grid is
//! taller than what is drawn so pieces can spawn above the visible window and
//! fall into view:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BOARD_COLS` | 10 | Columns |
//! | `BOARD_ROWS` | 40 | Rows (including the hidden spawn area) |
//! | `BOARD_VISIBLE_ROWS` | 20 | Bottom rows that are rendered |
//! | `SPAWN_ORIGIN` | (5, 20) | Origin of a freshly spawned piece |
//! | `HOLDING_ORIGIN` | (2, 2) | Origin of the held piece in the hold panel |
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GENERATION_DELAY_MS` | 200 | Wait before spawning the next piece |
//! | `ROW_CLEAR_DELAY_MS` | 75 | Completed rows stay visible this long |
//! | `TRAIL_CLEAR_DELAY_MS` | 50 | Hard-drop trail lifetime |
//! | `LONG_PRESS_MS` | 300 | Press duration that produces a `Hold` action |
//! | `INPUT_POLL_MS` | 10 | Input polling interval of the frontend |
//!
//! # Examples
//!
//! ```
//! use getris_types::{InputAction, InputEvent, LogicalInput, Phase, PieceKind};
//!
//! let kind = PieceKind::from_index(2).unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert!(PieceKind::from_index(7).is_err());
//!
//! let ev = InputEvent::new(LogicalInput::HardDrop, InputAction::Down);
//! assert!(ev.is_press_of(LogicalInput::HardDrop));
//!
//! assert_eq!(Phase::default(), Phase::Generation);
//! ```

pub mod config;
pub mod error;

pub use config::GameConfig;
pub use error::GameError;

/// Board width in cells.
pub const BOARD_COLS: usize = 10;

/// Board height in cells, including the hidden spawn area.
pub const BOARD_ROWS: usize = 40;

/// Only the bottom rows are rendered.
pub const BOARD_VISIBLE_ROWS: usize = 20;

/// Origin of a freshly spawned (or swapped-in) active piece.
pub const SPAWN_ORIGIN: (i32, i32) = (5, 20);

/// Narrowest board that holds every spawn orientation: the I piece reaches
/// two columns right of the spawn origin.
pub const MIN_BOARD_COLS: usize = SPAWN_ORIGIN.0 as usize + 3;

/// Lowest board that holds a spawned piece: spawn shapes reach one row above
/// the spawn origin.
pub const MIN_BOARD_ROWS: usize = SPAWN_ORIGIN.1 as usize + 2;

/// Origin of the held piece inside the 5x5 hold panel.
pub const HOLDING_ORIGIN: (i32, i32) = (2, 2);

/// Number of upcoming pieces kept in the queue.
pub const QUEUE_SIZE: usize = 5;

/// Origin of the bottom queue slot inside the queue panel.
pub const QUEUE_ORIGIN: (i32, i32) = (2, 1);

/// Vertical distance between two queue slots in the queue panel.
pub const QUEUE_SLOT_HEIGHT: i32 = 4;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Drop interval multiplier while soft drop is held (20x faster).
pub const SOFT_DROP_MULTIPLIER: f64 = 0.05;

/// Wait before a new piece is spawned.
pub const GENERATION_DELAY_MS: u64 = 200;

/// Time completed rows stay on screen before they are removed.
pub const ROW_CLEAR_DELAY_MS: u64 = 75;

/// Lifetime of the hard-drop trail.
pub const TRAIL_CLEAR_DELAY_MS: u64 = 50;

/// Press duration after which a still-held key emits a `Hold` action.
pub const LONG_PRESS_MS: u64 = 300;

/// Input polling interval of the frontend.
pub const INPUT_POLL_MS: u64 = 10;

/// Auto-release timeout for terminals that never report key releases.
pub const KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Blend towards `background`; `alpha` is the weight of `self`.
    pub fn blend(self, background: Rgb, alpha: f32) -> Rgb {
        let mix = |fg: u8, bg: u8| -> u8 {
            let v = fg as f32 * alpha + bg as f32 * (1.0 - alpha);
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

/// The seven tetromino shapes.
///
/// The declaration order is the order used by the random factory: index 0 is
/// `O`, index 6 is `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Map a random selector in `0..7` to a shape.
    ///
    /// Anything else is a logic defect in the caller and is reported as
    /// [`GameError::InvalidShape`].
    pub fn from_index(index: u32) -> Result<Self, GameError> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(GameError::InvalidShape(index))
    }

    /// Fixed display color of the shape.
    pub const fn color(self) -> Rgb {
        match self {
            PieceKind::O => Rgb::from_hex(0xFCFC32), // yellow
            PieceKind::I => Rgb::from_hex(0x5193E8), // light blue
            PieceKind::T => Rgb::from_hex(0xAC17AC), // purple
            PieceKind::L => Rgb::from_hex(0xFFA122), // orange
            PieceKind::J => Rgb::from_hex(0x310CA9), // dark blue
            PieceKind::S => Rgb::from_hex(0x00C400), // green
            PieceKind::Z => Rgb::from_hex(0xF50000), // red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "O",
            PieceKind::I => "I",
            PieceKind::T => "T",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }
}

/// Phases of the simulation state machine.
///
/// The machine starts in `Generation` and stops in `End`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No active piece; wait, then spawn one from the queue.
    #[default]
    Generation,
    /// The active piece falls until it hits something.
    Falling,
    /// The active piece is committed to the board.
    Lock,
    /// Full rows are detected, scored and removed.
    Completion,
    /// Only entered from (and only returns to) `Falling`.
    Paused,
    /// Waiting for any input before ending.
    GameOver,
    /// Terminal phase; the simulation task exits.
    End,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Generation => "generation",
            Phase::Falling => "falling",
            Phase::Lock => "lock",
            Phase::Completion => "completion",
            Phase::Paused => "paused",
            Phase::GameOver => "game_over",
            Phase::End => "end",
        }
    }
}

/// Logical game inputs, independent of the physical key that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalInput {
    Pause,
    Hold,
    RotateCcw,
    RotateCw,
    HardDrop,
    SoftDrop,
    MoveLeft,
    MoveRight,
}

impl LogicalInput {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalInput::Pause => "pause",
            LogicalInput::Hold => "hold",
            LogicalInput::RotateCcw => "rotate counter-clockwise",
            LogicalInput::RotateCw => "rotate clockwise",
            LogicalInput::HardDrop => "hard drop",
            LogicalInput::SoftDrop => "soft drop",
            LogicalInput::MoveLeft => "move left",
            LogicalInput::MoveRight => "move right",
        }
    }
}

/// What happened to the key behind a logical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Key was pressed.
    Down,
    /// Key is still held after the long-press interval.
    Hold,
    /// Key was released.
    Up,
}

impl InputAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputAction::Down => "down",
            InputAction::Hold => "hold",
            InputAction::Up => "up",
        }
    }
}

/// One entry of the input stream consumed by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    pub input: LogicalInput,
    pub action: InputAction,
    /// Raw key code as reported by the frontend; never inspected by the core.
    pub key_code: u32,
}

impl InputEvent {
    pub fn new(input: LogicalInput, action: InputAction) -> Self {
        Self {
            input,
            action,
            key_code: 0,
        }
    }

    pub fn with_key_code(mut self, key_code: u32) -> Self {
        self.key_code = key_code;
        self
    }

    pub fn is_press_of(&self, input: LogicalInput) -> bool {
        self.input == input && self.action == InputAction::Down
    }

    pub fn is_release_of(&self, input: LogicalInput) -> bool {
        self.input == input && self.action == InputAction::Up
    }
}
