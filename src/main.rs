//! Terminal runner (default binary).
//!
//! The simulation runs as a tokio task and owns every write to the game
//! state. This thread is the frontend: it polls crossterm for keys, forwards
//! them as input events, and renders a snapshot of the shared state once per
//! poll interval.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc::UnboundedSender;

use getris::core::{GameSnapshot, GameState};
use getris::engine::{SharedGame, Simulation, Timing};
use getris::input::{should_quit, Forwarded, InputForwarder};
use getris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use getris::types::{GameConfig, InputEvent};

/// Falling-block puzzle game in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "getris",
    version,
    about = "Falling-block puzzle game in the terminal.",
    long_about = "Falling-block puzzle game in the terminal.\n\n\
        CONTROLS:\n  Left/Right  Move        Up / x     Rotate CW    z          Rotate CCW\n  \
        Down        Soft drop   Space      Hard drop    c          Hold\n  \
        Esc / F1    Pause       q          Quit\n\n\
        The numeric keypad works too: 4/6 move, 2 soft drop, 8 hard drop, \
        1/5/9 and 3/7 rotate, 0 hold."
)]
struct Args {
    /// TOML file with game settings. Missing keys keep their defaults.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed of the piece generator. Overrides the config file.
    #[arg(long, value_name = "N")]
    seed: Option<u32>,

    /// Write logs to this file. Nothing is logged without it.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log every forwarded input event.
    #[arg(long)]
    debug_input: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    init_logging(args.log_file.as_deref())?;

    let seed = args
        .seed
        .or(config.seed)
        .unwrap_or_else(rand::random::<u32>);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
        .context("start tokio runtime")?;

    let game = SharedGame::new(GameState::from_config(&config, seed)?);
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let simulation = {
        let _rt = runtime.enter();
        Simulation::new(game.clone(), rx, Timing::from(&config)).spawn()
    };

    let mut term = TerminalRenderer::new();
    let release_events = term.enter()?;

    let result = run(&mut term, &game, tx, &config, release_events, args.debug_input);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    // The sender is gone, so the simulation winds down to End on its own.
    runtime
        .block_on(simulation)
        .context("simulation task panicked")?
        .context("simulation failed")?;

    let final_state = game.snapshot();
    println!(
        "score {}  level {}  lines {}",
        final_state.score, final_state.level, final_state.lines_cleared
    );
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config: GameConfig =
        toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file =
        File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    game: &SharedGame,
    tx: UnboundedSender<InputEvent>,
    config: &GameConfig,
    release_events: bool,
    debug_input: bool,
) -> Result<()> {
    let view = GameView::default().with_visible_rows(config.visible_rows());
    let mut forwarder = InputForwarder::from_config(config);
    if release_events {
        forwarder = forwarder.with_release_events();
    }
    tracing::info!(release_events, "frontend started");

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let poll = config.input_poll();

    loop {
        // Copy under the shared lock, draw after it is released.
        game.snapshot_into(&mut snap);
        if snap.done {
            return Ok(());
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        if event::poll(poll)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    let events = match key.kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            forwarder.press(key.code, Instant::now())
                        }
                        KeyEventKind::Release => forwarder.release(key.code, Instant::now()),
                    };
                    if !forward(&tx, events, debug_input) {
                        return Ok(());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if !forward(&tx, forwarder.tick(Instant::now()), debug_input) {
            return Ok(());
        }
    }
}

/// Push events to the simulation. False once it has stopped listening.
fn forward(tx: &UnboundedSender<InputEvent>, events: Forwarded, debug_input: bool) -> bool {
    for ev in events {
        if debug_input {
            tracing::info!(
                input = ev.input.as_str(),
                action = ev.action.as_str(),
                key_code = ev.key_code,
                "input"
            );
        }
        if tx.send(ev).is_err() {
            return false;
        }
    }
    true
}
