//! Board module - the playfield grid
//!
//! The board is a `cols x rows` grid of [`Cell`]s stored in a flat row-major
//! vector. Coordinates are `(x, y)` with `x` growing to the right and `y`
//! growing **upwards**: row 0 is the bottom row.
//!
//! Dimensions are fixed at construction; only cell contents change.

use getris_types::{Rgb, BOARD_COLS, BOARD_ROWS};

/// One board cell.
///
/// A ghost cell is drawn translucently (a row pending clear or a hard-drop
/// trail) and is never solid for collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub is_filled: bool,
    pub is_ghost: bool,
    pub color: Rgb,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        is_filled: false,
        is_ghost: false,
        color: Rgb::BLACK,
    };

    pub const fn filled(color: Rgb) -> Self {
        Cell {
            is_filled: true,
            is_ghost: false,
            color,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: usize,
    /// Row-major cells (`y * cols + x`), row 0 first.
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::EMPTY; cols * rows],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        Some((y as usize) * self.cols + (x as usize))
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell at `(x, y)`, `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    /// Mutable cell at `(x, y)`, `None` outside the grid.
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(move |idx| &mut self.cells[idx])
    }

    /// Overwrite a cell. Returns false (and drops the write) outside the grid.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.get_mut(x, y) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Filled for collision purposes. Cells outside the grid are not filled.
    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|c| c.is_filled)
    }

    /// One row, `None` past the top.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.rows {
            return None;
        }
        let start = y * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    fn row_mut(&mut self, y: usize) -> &mut [Cell] {
        let start = y * self.cols;
        &mut self.cells[start..start + self.cols]
    }

    /// Every cell of the row is filled.
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_filled))
    }

    /// Turn a row into ghosts: no longer solid, still visible until removed.
    pub fn mark_row_for_deletion(&mut self, y: usize) {
        if y >= self.rows {
            return;
        }
        for cell in self.row_mut(y) {
            cell.is_filled = false;
            cell.is_ghost = true;
        }
    }

    /// Remove row `y`: every row above moves down by one and the top row is
    /// cleared.
    pub fn remove_row(&mut self, y: usize) {
        if y >= self.rows {
            return;
        }
        let cols = self.cols;
        // copy_within handles the overlapping ranges
        self.cells.copy_within((y + 1) * cols.., y * cols);
        let top = self.rows - 1;
        self.row_mut(top).fill(Cell::EMPTY);
    }

    /// Drop every ghost flag (trail and pending-clear marks alike).
    pub fn clear_ghosts(&mut self) {
        for cell in &mut self.cells {
            cell.is_ghost = false;
        }
    }

    /// All cells, row 0 first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a board from rows listed top to bottom, `#` filled and `.` empty.
    ///
    /// Handy for scenario setup in tests and benches.
    pub fn from_ascii(cols: usize, top_down: &[&str], color: Rgb) -> Self {
        let rows = top_down.len();
        let mut board = Board::new(cols, rows);
        for (i, line) in top_down.iter().enumerate() {
            let y = (rows - 1 - i) as i32;
            for (x, ch) in line.chars().take(cols).enumerate() {
                if ch == '#' {
                    board.set(x as i32, y, Cell::filled(color));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_COLS, BOARD_ROWS)
    }
}
