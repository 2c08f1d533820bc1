use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use getris::core::{Board, Cell, GameState, Tetromino};
use getris::engine::{SharedGame, Simulation, Timing};
use getris::types::{
    GameError, InputAction, InputEvent, LogicalInput, Phase, Rgb, HOLDING_ORIGIN, SPAWN_ORIGIN,
};

struct Harness {
    game: SharedGame,
    tx: UnboundedSender<InputEvent>,
    handle: JoinHandle<Result<(), GameError>>,
}

impl Harness {
    fn start(state: GameState) -> Self {
        let game = SharedGame::new(state);
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = Simulation::new(game.clone(), rx, Timing::default()).spawn();
        Self { game, tx, handle }
    }

    fn send(&self, input: LogicalInput, action: InputAction) {
        self.tx.send(InputEvent::new(input, action)).unwrap();
    }

    fn press(&self, input: LogicalInput) {
        self.send(input, InputAction::Down);
    }

    fn active(&self) -> Tetromino {
        self.game.read().active().unwrap()
    }

    async fn shutdown(self) -> Result<(), GameError> {
        drop(self.tx);
        self.handle.await.unwrap()
    }
}

async fn at_ms(ms: u64) {
    sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn spawns_after_generation_delay() {
    let h = Harness::start(GameState::new(7).unwrap());

    at_ms(150).await;
    assert_eq!(h.game.phase(), Phase::Generation);
    assert!(h.game.read().active().is_none());

    at_ms(100).await;
    assert_eq!(h.game.phase(), Phase::Falling);
    let active = h.active();
    assert_eq!((active.origin_x, active.origin_y), SPAWN_ORIGIN);

    h.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn drop_timer_and_soft_drop_rescale() {
    let h = Harness::start(GameState::new(7).unwrap());

    // Spawn at 200 ms, then one row per second at level 1.
    at_ms(3250).await;
    assert_eq!(h.active().origin_y, 17);

    // Soft drop: one row per 50 ms, timer restarted at the press.
    h.press(LogicalInput::SoftDrop);
    at_ms(525).await;
    assert_eq!(h.active().origin_y, 7);

    // Release restores the normal interval, restarted at the release.
    h.send(LogicalInput::SoftDrop, InputAction::Up);
    at_ms(500).await;
    assert_eq!(h.active().origin_y, 7);
    at_ms(525).await;
    assert_eq!(h.active().origin_y, 6);

    h.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn moves_and_rotations_apply_on_press_only() {
    let h = Harness::start(GameState::new(11).unwrap());
    at_ms(250).await;
    let spawned = h.active();

    h.press(LogicalInput::MoveLeft);
    h.send(LogicalInput::MoveLeft, InputAction::Up);
    h.send(LogicalInput::MoveRight, InputAction::Hold);
    at_ms(1).await;
    assert_eq!(h.active().origin_x, spawned.origin_x - 1);

    h.press(LogicalInput::RotateCw);
    at_ms(1).await;
    let mut expected = spawned;
    expected.rotate_clockwise();
    assert_eq!(h.active().cells, expected.cells);

    h.press(LogicalInput::RotateCcw);
    at_ms(1).await;
    assert_eq!(h.active().cells, spawned.cells);

    h.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn hold_into_empty_slot_then_swap() {
    let h = Harness::start(GameState::new(3).unwrap());
    at_ms(250).await;
    let first = h.active();
    let next_kind = h.game.read().queue()[0].kind;

    h.press(LogicalInput::Hold);
    at_ms(10).await;
    assert_eq!(h.game.phase(), Phase::Generation);
    let held = h.game.read().holding().unwrap();
    assert_eq!(held.cells, first.cells);
    assert_eq!(held.color, first.color);
    assert_eq!((held.origin_x, held.origin_y), HOLDING_ORIGIN);

    // A new piece is generated after the usual delay.
    at_ms(250).await;
    assert_eq!(h.game.phase(), Phase::Falling);
    let second = h.active();
    assert_eq!(second.kind, next_kind);

    h.press(LogicalInput::Hold);
    at_ms(1).await;
    assert_eq!(h.game.phase(), Phase::Falling);
    let active = h.active();
    assert_eq!(active.cells, first.cells);
    assert_eq!((active.origin_x, active.origin_y), SPAWN_ORIGIN);
    let held = h.game.read().holding().unwrap();
    assert_eq!(held.kind, second.kind);
    assert_eq!(held.color, second.color);

    h.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_the_piece_until_released_again() {
    let h = Harness::start(GameState::new(5).unwrap());
    at_ms(250).await;

    // Only the release toggles pause.
    h.press(LogicalInput::Pause);
    at_ms(1).await;
    assert_eq!(h.game.phase(), Phase::Falling);
    h.send(LogicalInput::Pause, InputAction::Up);
    at_ms(1).await;
    assert_eq!(h.game.phase(), Phase::Paused);
    assert!(h.game.snapshot().paused());

    let frozen = h.active();
    h.press(LogicalInput::MoveLeft);
    at_ms(5000).await;
    assert_eq!(h.active(), frozen);

    h.send(LogicalInput::Pause, InputAction::Up);
    at_ms(1).await;
    assert_eq!(h.game.phase(), Phase::Falling);
    at_ms(1050).await;
    assert_eq!(h.active().origin_y, frozen.origin_y - 1);

    h.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn hard_drop_clears_a_row_and_spawns_again() {
    let seed = 21;

    // Find where the first piece lands on an empty board.
    let mut probe = GameState::new(seed).unwrap();
    probe.generate().unwrap();
    probe.hard_drop();
    let holes: Vec<i32> = probe
        .active()
        .unwrap()
        .cells()
        .filter(|&(_, y)| y == 0)
        .map(|(x, _)| x)
        .collect();
    assert!(!holes.is_empty());

    let mut board = Board::default();
    for x in 0..10 {
        if !holes.contains(&x) {
            board.set(x, 0, Cell::filled(Rgb::BLACK));
        }
    }

    let h = Harness::start(GameState::with_board(board, seed).unwrap());
    at_ms(250).await;
    h.press(LogicalInput::HardDrop);

    at_ms(10).await;
    {
        let state = h.game.read();
        assert_eq!(state.phase(), Phase::Completion);
        assert_eq!(state.score(), 100);
        assert_eq!(state.lines_cleared(), 1);
        assert!(state.active().is_none());
    }

    // Rows are removed after the clear delay, then a new piece spawns.
    at_ms(100).await;
    {
        let state = h.game.read();
        assert_eq!(state.phase(), Phase::Generation);
        assert!(!state.board().is_row_complete(0));
        assert!(state.board().cells().iter().all(|c| !c.is_ghost));
    }
    at_ms(250).await;
    assert_eq!(h.game.phase(), Phase::Falling);

    h.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn game_over_then_any_input_ends() {
    let mut board = Board::default();
    for y in 18..=22 {
        for x in 0..10 {
            board.set(x, y, Cell::filled(Rgb::BLACK));
        }
    }
    let h = Harness::start(GameState::with_board(board, 1).unwrap());

    at_ms(300).await;
    assert_eq!(h.game.phase(), Phase::GameOver);
    assert!(h.game.snapshot().game_over());
    assert!(!h.game.is_done());

    h.press(LogicalInput::MoveLeft);
    let game = h.game.clone();
    h.handle.await.unwrap().unwrap();
    assert_eq!(game.phase(), Phase::End);
    assert!(game.is_done());
}

#[tokio::test(start_paused = true)]
async fn closed_input_ends_the_game() {
    let h = Harness::start(GameState::new(2).unwrap());
    at_ms(250).await;
    let game = h.game.clone();

    h.shutdown().await.unwrap();
    assert_eq!(game.phase(), Phase::End);
    assert!(game.is_done());
}
