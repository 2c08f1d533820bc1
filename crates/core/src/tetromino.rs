//! Tetromino module - geometric model of one piece
//!
//! A tetromino is an origin in board space plus four offsets. Translation
//! moves the origin, rotation rewrites the offsets; the two never interact.

use getris_types::{GameError, PieceKind, Rgb};

use crate::board::{Board, Cell};
use crate::pieces::{get_shape, CellOffset};
use crate::rng::SimpleRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Origin in board space (not screen space).
    pub origin_x: i32,
    pub origin_y: i32,
    /// Offsets from the origin.
    pub cells: [CellOffset; 4],
    pub color: Rgb,
}

impl Tetromino {
    /// A piece of the given shape at `(origin_x, origin_y)`, spawn orientation.
    pub fn new(kind: PieceKind, origin_x: i32, origin_y: i32) -> Self {
        Self {
            kind,
            origin_x,
            origin_y,
            cells: get_shape(kind),
            color: kind.color(),
        }
    }

    /// A uniformly random shape at the given origin. Back-to-back repeats are
    /// possible.
    pub fn random(rng: &mut SimpleRng, origin_x: i32, origin_y: i32) -> Result<Self, GameError> {
        let kind = PieceKind::from_index(rng.next_range(PieceKind::ALL.len() as u32))?;
        Ok(Self::new(kind, origin_x, origin_y))
    }

    pub fn set_origin(&mut self, (x, y): (i32, i32)) {
        self.origin_x = x;
        self.origin_y = y;
    }

    /// Absolute coordinates of the four cells, always in the same order.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .map(move |&(dx, dy)| (self.origin_x + dx, self.origin_y + dy))
    }

    /// True as soon as `pred` holds for one absolute cell.
    pub fn any_cell(&self, mut pred: impl FnMut(i32, i32) -> bool) -> bool {
        self.cells().any(|(x, y)| pred(x, y))
    }

    /// The piece color if `(x, y)` is one of its cells.
    pub fn is_cell_at(&self, x: i32, y: i32) -> Option<Rgb> {
        self.any_cell(|cx, cy| cx == x && cy == y)
            .then_some(self.color)
    }

    /// Out of bounds left, right or below, or overlapping a filled cell.
    ///
    /// There is no upper bound: cells above the grid are legal and never
    /// collide.
    pub fn collides(&self, board: &Board) -> bool {
        let cols = board.cols() as i32;
        self.any_cell(|x, y| x < 0 || x >= cols || y < 0 || board.is_filled(x, y))
    }

    /// Copy the piece onto the board as filled cells.
    pub fn commit_to_board(&self, board: &mut Board) {
        for (x, y) in self.cells() {
            if let Some(cell) = board.get_mut(x, y) {
                *cell = Cell::filled(self.color);
            } else {
                tracing::trace!(x, y, "committed cell outside the grid dropped");
            }
        }
    }

    /// Copy the piece onto the board as a ghost trail (not solid).
    pub fn commit_trail_to_board(&self, board: &mut Board) {
        for (x, y) in self.cells() {
            if let Some(cell) = board.get_mut(x, y) {
                cell.is_ghost = true;
                cell.color = self.color;
            }
        }
    }

    pub fn rotate_clockwise(&mut self) {
        for cell in &mut self.cells {
            *cell = (cell.1, -cell.0);
        }
    }

    pub fn rotate_counter_clockwise(&mut self) {
        for cell in &mut self.cells {
            *cell = (-cell.1, cell.0);
        }
    }
}
