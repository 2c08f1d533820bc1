//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Board space has row 0 at the bottom; the framebuffer has row 0 at the top,
//! so every grid is flipped vertically on the way out. Only the bottom
//! `visible_rows` rows of the board are drawn. The hold and queue panels are
//! small grids of their own, and pieces in them are drawn at their stored
//! origins.

use crate::core::{GameSnapshot, Tetromino};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BOARD_VISIBLE_ROWS, QUEUE_SIZE, QUEUE_SLOT_HEIGHT};

/// Width of the hold and queue panels in cells.
pub const PANEL_COLS: u16 = 6;
/// Height of the hold panel in cells.
pub const HOLD_PANEL_ROWS: u16 = 5;
/// Height of the queue panel in cells.
pub const QUEUE_PANEL_ROWS: u16 = QUEUE_SIZE as u16 * QUEUE_SLOT_HEIGHT as u16;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const GHOST_ALPHA: f32 = 0.45;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Top-left corner of a framed grid plus its height in cells.
#[derive(Debug, Clone, Copy)]
struct Grid {
    x: u16,
    y: u16,
    cols: u16,
    rows: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    visible_rows: usize,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
            visible_rows: BOARD_VISIBLE_ROWS,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_visible_rows(mut self, rows: usize) -> Self {
        self.visible_rows = rows;
        self
    }

    fn frame_size(&self, grid_cols: u16, grid_rows: u16) -> (u16, u16) {
        (grid_cols * self.cell_w + 2, grid_rows * self.cell_h + 2)
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let cols = snap.board.cols() as u16;
        let rows = self.visible_rows.min(snap.board.rows()) as u16;
        let (frame_w, frame_h) = self.frame_size(cols, rows);
        let (panel_w, _) = self.frame_size(PANEL_COLS, 0);

        let panels_w = 2 * (panel_w + 1);
        let with_panels = viewport.width >= frame_w + panels_w;
        let total_w = if with_panels { frame_w + panels_w } else { frame_w };

        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let board = Grid {
            x: if with_panels { start_x + panel_w + 1 } else { start_x },
            y: start_y,
            cols,
            rows,
        };
        self.draw_board(fb, snap, board);

        if with_panels {
            let hold = Grid {
                x: start_x,
                y: start_y,
                cols: PANEL_COLS,
                rows: HOLD_PANEL_ROWS,
            };
            self.draw_panel(fb, hold, "HOLD", snap.holding.iter());

            let (_, hold_h) = self.frame_size(PANEL_COLS, HOLD_PANEL_ROWS);
            self.draw_stats(fb, snap, start_x, start_y.saturating_add(hold_h + 1));

            let queue = Grid {
                x: board.x + frame_w + 1,
                y: start_y,
                cols: PANEL_COLS,
                rows: QUEUE_PANEL_ROWS,
            };
            self.draw_panel(fb, queue, "NEXT", snap.queue.iter());
        }

        if snap.paused() {
            self.draw_overlay_text(fb, board, "PAUSED");
        } else if snap.game_over() {
            self.draw_overlay_text(fb, board, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, grid: Grid) {
        let (frame_w, frame_h) = self.frame_size(grid.cols, grid.rows);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
        fb.fill_rect(
            grid.x + 1,
            grid.y + 1,
            grid.cols * self.cell_w,
            grid.rows * self.cell_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        self.draw_border(fb, grid.x, grid.y, frame_w, frame_h, border);

        for y in 0..grid.rows {
            for x in 0..grid.cols {
                let Some(cell) = snap.board.get(x as i32, y as i32) else {
                    continue;
                };
                if cell.is_filled {
                    self.draw_block(fb, grid, x as i32, y as i32, cell.color);
                } else if cell.is_ghost {
                    self.draw_ghost(fb, grid, x as i32, y as i32, cell.color);
                } else {
                    self.draw_empty_cell(fb, grid, x, y);
                }
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                self.draw_block(fb, grid, x, y, active.color);
            }
        }
    }

    fn draw_panel<'a>(
        &self,
        fb: &mut FrameBuffer,
        grid: Grid,
        title: &str,
        pieces: impl Iterator<Item = &'a Tetromino>,
    ) {
        let (frame_w, frame_h) = self.frame_size(grid.cols, grid.rows);
        let border = CellStyle::new(Rgb::new(160, 160, 170), Rgb::BLACK);
        fb.fill_rect(
            grid.x + 1,
            grid.y + 1,
            grid.cols * self.cell_w,
            grid.rows * self.cell_h,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        self.draw_border(fb, grid.x, grid.y, frame_w, frame_h, border);
        fb.put_str(grid.x + 1, grid.y, title, border.bold());

        for piece in pieces {
            for (x, y) in piece.cells() {
                self.draw_block(fb, grid, x, y, piece.color);
            }
        }
    }

    fn draw_stats(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);

        let mut y = y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines_cleared),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, grid: Grid, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, grid, x as i32, y as i32, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, grid: Grid, x: i32, y: i32, color: Rgb) {
        let style = CellStyle::new(color, BOARD_BG).bold();
        self.fill_cell_rect(fb, grid, x, y, '█', style);
    }

    fn draw_ghost(&self, fb: &mut FrameBuffer, grid: Grid, x: i32, y: i32, color: Rgb) {
        let style = CellStyle::new(color.blend(BOARD_BG, GHOST_ALPHA), BOARD_BG).dim();
        self.fill_cell_rect(fb, grid, x, y, '░', style);
    }

    /// Fill one grid cell. Cells outside the grid (including rows above the
    /// visible window) are skipped.
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        grid: Grid,
        x: i32,
        y: i32,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || y < 0 || x >= grid.cols as i32 || y >= grid.rows as i32 {
            return;
        }
        let flipped = grid.rows - 1 - y as u16;
        let px = grid.x + 1 + x as u16 * self.cell_w;
        let py = grid.y + 1 + flipped * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, board: Grid, text: &str) {
        let (frame_w, frame_h) = self.frame_size(board.cols, board.rows);
        let mid_y = board.y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = board.x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::BLACK).bold();
        fb.put_str(x, mid_y, text, style);
    }
}
