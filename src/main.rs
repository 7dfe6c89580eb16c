//! Terminal match-3 runner (default binary).
//!
//! crossterm for input, a framebuffer renderer for output, and a fixed
//! timestep driving the session's settle delay.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_match3::engine::{GameSession, LevelConfig, SelectOutcome, SessionError, SessionSnapshot};
use tui_match3::input::{handle_key_event, should_quit, Cursor};
use tui_match3::logging::{init_log, LogConfig};
use tui_match3::term::{BoardView, FrameBuffer, TerminalRenderer, Viewport};
use tui_match3::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    init_log(&LogConfig::from_env())?;

    let config = LevelConfig::from_env().context("invalid level configuration")?;
    let mut session = GameSession::new(config).context("could not build the level")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("game loop failed: {:#}", err);
    }
    result
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    let view = BoardView::default();
    let board = session.board();
    let mut cursor = Cursor::new(board.width(), board.height());
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = SessionSnapshot::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Some(cursor.position()), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply_action(session, &mut cursor, action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            match session.tick(TICK_MS) {
                Ok(Some(turn)) => log::debug!(
                    "turn finished: matched={} removed={} passes={}",
                    turn.matched,
                    turn.report.removed,
                    turn.report.passes
                ),
                Ok(None) => {}
                Err(err) => recover(session, &err),
            }
            // Tiles snap into place; there is no tweening in the terminal.
            session.drain_motions();
        }
    }
}

fn apply_action(session: &mut GameSession, cursor: &mut Cursor, action: GameAction) {
    match action {
        GameAction::Cursor(dir) => {
            cursor.step(dir);
        }
        GameAction::Select => {
            let pos = cursor.position();
            match session.select(pos) {
                Ok(SelectOutcome::Rejected) => {
                    log::debug!("swap with ({}, {}) rejected: not adjacent", pos.col, pos.row)
                }
                Ok(_) => {}
                Err(err) => recover(session, &err),
            }
        }
        GameAction::Hint => {
            if session.hint().is_none() {
                log::info!("no productive swap on the board");
            }
        }
        GameAction::Restart => {
            if let Err(err) = session.restart() {
                log::error!("restart failed, keeping the current board: {}", err);
            }
            let board = session.board();
            cursor.resize(board.width(), board.height());
        }
    }
}

/// Mid-game failures are logged and the board is rebuilt; the loop keeps going.
fn recover(session: &mut GameSession, err: &SessionError) {
    if let Err(rebuild) = session.recover(err) {
        log::error!("could not rebuild the board, continuing as is: {}", rebuild);
    }
}
