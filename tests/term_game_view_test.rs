use getris::core::{Cell, GameSnapshot, GameState, Tetromino};
use getris::term::{AnchorY, GameView, Viewport};
use getris::types::{Phase, PieceKind, HOLDING_ORIGIN};

fn screen_text(fb: &getris::term::FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).unwrap().snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameSnapshot::default();
    snap.board.set(0, 0, Cell::filled(PieceKind::I.color()));

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin, board row 0 is the last row inside.
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_ne!(fb.get(3, 20).unwrap().ch, '█');
}

#[test]
fn term_view_draws_active_piece_once_it_enters_the_window() {
    let mut snap = GameSnapshot::default();
    snap.active = Some(Tetromino::new(PieceKind::O, 0, 18));

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    // O covers rows 18 and 19, the top two rows inside the frame.
    assert_eq!(fb.get(1, 1).unwrap().ch, '█');
    assert_eq!(fb.get(3, 2).unwrap().ch, '█');
    assert_eq!(fb.get(1, 1).unwrap().style.fg, PieceKind::O.color());
}

#[test]
fn term_view_draws_side_panels_when_wide_enough() {
    let mut state = GameState::new(1).unwrap();
    state.generate().unwrap();
    state.hold();
    let mut snap = state.snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines_cleared = 10;

    let fb = GameView::default().render(&snap, Viewport::new(60, 22));
    let all = screen_text(&fb);
    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("LEVEL"));
    assert!(all.contains("LINES"));
    assert!(all.contains("HOLD"));
    assert!(all.contains("NEXT"));

    // Held piece origin cell inside the hold panel (5 rows tall).
    // Layout is centered: (60 - 52) / 2 = 4.
    let held = snap.holding.unwrap();
    assert_eq!((held.origin_x, held.origin_y), HOLDING_ORIGIN);
    let px = 4 + 1 + 2 * HOLDING_ORIGIN.0 as u16;
    let py = 1 + (5 - 1 - HOLDING_ORIGIN.1 as u16);
    assert_eq!(fb.get(px, py).unwrap().ch, '█');
    assert_eq!(fb.get(px, py).unwrap().style.fg, held.color);
}

#[test]
fn term_view_skips_panels_on_narrow_viewports() {
    let snap = GameState::new(1).unwrap().snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(40, 22));
    let all = screen_text(&fb);
    assert!(!all.contains("SCORE"));
    assert!(!all.contains("NEXT"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::new(1).unwrap().snapshot();
    let view = GameView::default();

    // Board frame is 22 rows tall (20 + border).
    let fb = view.render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');

    let fb = view
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(22, 30));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_respects_visible_rows() {
    let snap = GameSnapshot::default();
    let fb = GameView::default()
        .with_visible_rows(10)
        .with_anchor_y(AnchorY::Top)
        .render(&snap, Viewport::new(22, 22));
    assert_eq!(fb.get(0, 11).unwrap().ch, '└');
}

#[test]
fn term_view_overlays_game_over() {
    let mut snap = GameSnapshot::default();
    snap.phase = Phase::End;
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));
    assert!(screen_text(&fb).contains("GAME OVER"));
}
