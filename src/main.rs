//! Terminal runner (default binary).
//!
//! Drives one or two games from crossterm input and a monotonic clock, and
//! draws them with the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use blocktris::config::Config;
use blocktris::core::{GameSnapshot, PieceGenerator, Session};
use blocktris::input::{handle_key_event, route_key_event, should_quit};
use blocktris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blocktris::types::PlayerId;

fn main() -> Result<()> {
    let config = Config::from_env().context("invalid BLOCKTRIS_* environment")?;
    let seed = config
        .seed
        .unwrap_or_else(|| PieceGenerator::from_entropy().seed());
    let mut session = Session::new(config.players, seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, &config);

    // Always try to restore terminal state.
    let restored = term.exit();

    for (player, game) in session.players().zip(session.games()) {
        eprintln!(
            "[blocktris] player {} score={} lines={} level={}",
            player.0 + 1,
            game.score(),
            game.lines(),
            game.level()
        );
    }
    eprintln!("[blocktris] seed={seed}");

    result.and(restored)
}

fn run(term: &mut TerminalRenderer, session: &mut Session, config: &Config) -> Result<()> {
    let view = GameView::default();
    let tick = Duration::from_millis(config.tick_ms as u64);
    let started = Instant::now();

    let mut snaps = vec![GameSnapshot::default(); session.len()];
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        for (snap, game) in snaps.iter_mut().zip(session.games()) {
            game.snapshot_into(snap);
        }
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snaps, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let frame_start = Instant::now();
        while let Some(timeout) = tick.checked_sub(frame_start.elapsed()) {
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    dispatch_key(session, key);
                }
                Event::FocusLost => session.pause_all(),
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        session.update(started.elapsed().as_millis() as u64);
    }
}

fn dispatch_key(session: &mut Session, key: KeyEvent) {
    if session.len() == 1 {
        if let Some(action) = handle_key_event(key) {
            session.dispatch(PlayerId::ONE, action);
        }
        return;
    }

    if let Some((player, action)) = route_key_event(key) {
        session.dispatch(player, action);
    }
}
