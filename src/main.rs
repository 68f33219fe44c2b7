//! Terminal Color Lines runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer renderer
//! from `color_lines::term`. Game time is milliseconds since start; the
//! controller decides what happens, this loop only feeds it activations and
//! draws snapshots.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use color_lines::core::{EventLog, GameController, GameSnapshot};
use color_lines::input::{handle_key_event, should_quit, Cursor};
use color_lines::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use color_lines::types::GameConfig;

/// Upper bound on one input poll, so the screen keeps up with blinking.
const FRAME_MS: u64 = 16;

/// Keep-alive redraw interval for a still board.
const STATIC_REDRAW_MS: u64 = 500;

fn main() -> Result<()> {
    let config = GameConfig::from_env().context("reading LINES_* configuration")?;

    let mut ctl = GameController::new(&config);
    if let Some(path) = config.event_log.as_deref() {
        match EventLog::open(path) {
            Ok(log) => {
                println!("[Lines] event log: {path}");
                ctl = ctl.with_event_log(log);
            }
            Err(e) => eprintln!("[Lines] event log disabled ({path}): {e}"),
        }
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut ctl);

    // Always try to restore terminal state.
    let _ = term.exit();

    if result.is_ok() {
        println!("[Lines] final score: {}", ctl.score());
    }
    result
}

fn run(term: &mut TerminalRenderer, ctl: &mut GameController) -> Result<()> {
    let start = Instant::now();
    let elapsed_ms = || start.elapsed().as_millis() as u64;

    let view = GameView::default();
    let mut cursor = Cursor::new(ctl.board().size());
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);

    loop {
        // Render.
        ctl.snapshot_into(&mut snap);
        if throttle.should_render(elapsed_ms(), snap.fingerprint(), snap.is_animating()) {
            view.render_into_with_cursor(&snap, Some(cursor.pos()), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input, waiting no longer than the next due event.
        let wait = ctl
            .idle_for(elapsed_ms())
            .map_or(FRAME_MS, |ms| ms.min(FRAME_MS));

        let mut input = None;
        if event::poll(Duration::from_millis(wait))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        input = cursor.apply(action);
                        throttle.invalidate();
                    }
                }
                Event::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(pos) = view.cell_at(snap.size, viewport, m.column, m.row) {
                        cursor.set(pos);
                        input = Some(pos);
                        throttle.invalidate();
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        ctl.step(elapsed_ms(), input);
    }
}
