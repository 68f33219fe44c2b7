use std::collections::BTreeSet;

use color_lines::core::{Board, GameController, GameSnapshot, Mode};
use color_lines::term::{bead_rgb, AnchorY, GameView, Viewport, DESPAWN_COLOR};
use color_lines::types::{Color, GameConfig, Position};

// With cell_w=3 and cell_h=1 a 9x9 board is 27x9, plus border 29x11,
// plus the score line below.
const VP: Viewport = Viewport {
    width: 29,
    height: 12,
};

fn snapshot(rows: &[&str]) -> GameSnapshot {
    GameController::from_board(&GameConfig::default(), Board::from_diagram(rows)).snapshot()
}

fn empty_rows() -> [&'static str; 9] {
    ["........."; 9]
}

/// Terminal coordinate of the bead glyph for `pos` in `VP`.
fn bead_xy(pos: Position) -> (u16, u16) {
    (1 + pos.col as u16 * 3 + 1, 1 + pos.row as u16)
}

fn glyph(fb: &color_lines::term::FrameBuffer, pos: Position) -> char {
    let (x, y) = bead_xy(pos);
    fb.get(x, y).map(|c| c.ch).unwrap_or(' ')
}

#[test]
fn term_view_renders_border_corners() {
    let snap = snapshot(&empty_rows());
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, VP);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(28, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 10).unwrap().ch, '└');
    assert_eq!(fb.get(28, 10).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_beads_and_empty_cells() {
    let mut rows = empty_rows();
    rows[2] = "...4.....";
    let snap = snapshot(&rows);
    let fb = GameView::default().render(&snap, VP);

    let (x, y) = bead_xy(Position::new(2, 3));
    let cell = fb.get(x, y).unwrap();
    assert_eq!(cell.ch, '●');
    assert_eq!(cell.style.fg, bead_rgb(Color::new(4)));
    assert_eq!(glyph(&fb, Position::new(0, 0)), '·');
}

#[test]
fn term_view_score_line() {
    let mut snap = snapshot(&empty_rows());
    snap.score = 1234;
    let fb = GameView::default().render(&snap, VP);
    assert!(fb.row_text(11).starts_with("Score: 1234"));
    assert!(!fb.row_text(11).contains("GAME OVER"));

    snap.game_over = true;
    snap.mode = Mode::AwaitingRestart;
    let fb = GameView::default().render(&snap, Viewport::new(60, 12));
    assert!(fb.row_text(11).contains("Score: 1234 ** GAME OVER **"));
}

#[test]
fn term_view_selection_ring_blinks() {
    let mut rows = empty_rows();
    rows[4] = "....1....";
    let mut snap = snapshot(&rows);
    let pos = Position::new(4, 4);
    snap.mode = Mode::AwaitingSelection { selected: Some(pos) };
    let view = GameView::default();
    let (x, y) = bead_xy(pos);

    // (tick / 5) % 3 picks the ring weight; the ring never disappears.
    snap.animation_tick = 0;
    let fb = view.render(&snap, VP);
    assert_eq!(fb.get(x - 1, y).unwrap().ch, '(');
    assert_eq!(fb.get(x + 1, y).unwrap().ch, ')');
    snap.animation_tick = 5;
    assert_eq!(view.render(&snap, VP).get(x - 1, y).unwrap().ch, '[');
    snap.animation_tick = 10;
    let fb = view.render(&snap, VP);
    assert_eq!(fb.get(x - 1, y).unwrap().ch, '▐');
    assert_eq!(fb.get(x + 1, y).unwrap().ch, '▌');
    snap.animation_tick = 15;
    assert_eq!(view.render(&snap, VP).get(x - 1, y).unwrap().ch, '(');
}

#[test]
fn term_view_spawn_blink_hides_bead() {
    let mut rows = empty_rows();
    rows[0] = "2........";
    let mut snap = snapshot(&rows);
    let pos = Position::new(0, 0);
    snap.recently_spawned = BTreeSet::from([pos]);
    let view = GameView::default();

    snap.animation_tick = 0;
    assert_eq!(glyph(&view.render(&snap, VP), pos), '●');
    snap.animation_tick = 6;
    assert_eq!(glyph(&view.render(&snap, VP), pos), '·');
    snap.animation_tick = 12;
    assert_eq!(glyph(&view.render(&snap, VP), pos), '●');
}

#[test]
fn term_view_despawn_alternates_color() {
    let mut rows = empty_rows();
    rows[0] = "3........";
    let mut snap = snapshot(&rows);
    let pos = Position::new(0, 0);
    snap.pending_removal = BTreeSet::from([pos]);
    let view = GameView::default();
    let (x, y) = bead_xy(pos);

    snap.animation_tick = 0;
    assert_eq!(view.render(&snap, VP).get(x, y).unwrap().style.fg, bead_rgb(Color::new(3)));
    snap.animation_tick = 1;
    assert_eq!(view.render(&snap, VP).get(x, y).unwrap().style.fg, DESPAWN_COLOR);
}

#[test]
fn term_view_removal_blink_wins_over_spawn_blink() {
    let mut rows = empty_rows();
    rows[0] = "5........";
    let mut snap = snapshot(&rows);
    let pos = Position::new(0, 0);
    snap.recently_spawned = BTreeSet::from([pos]);
    snap.pending_removal = BTreeSet::from([pos]);
    let view = GameView::default();
    let (x, y) = bead_xy(pos);

    // Tick 7 hides a plain spawned bead but shows the removal highlight.
    snap.animation_tick = 7;
    let cell = view.render(&snap, VP).get(x, y).unwrap();
    assert_eq!(cell.ch, '●');
    assert_eq!(cell.style.fg, DESPAWN_COLOR);

    snap.animation_tick = 6;
    let cell = view.render(&snap, VP).get(x, y).unwrap();
    assert_eq!(cell.ch, '●');
    assert_eq!(cell.style.fg, bead_rgb(Color::new(5)));
}

#[test]
fn term_view_cursor_highlight_and_mouse_mapping_agree() {
    let snap = snapshot(&empty_rows());
    let view = GameView::default();
    let pos = Position::new(6, 2);
    let fb = view.render_with_cursor(&snap, Some(pos), VP);

    let (x, y) = bead_xy(pos);
    let other = bead_xy(Position::new(6, 3));
    assert_ne!(fb.get(x, y).unwrap().style.bg, fb.get(other.0, other.1).unwrap().style.bg);
    assert_eq!(view.cell_at(9, VP, x, y), Some(pos));
    assert_eq!(view.cell_at(9, VP, x - 1, y), Some(pos));
    assert_eq!(view.cell_at(9, VP, 0, y), None);
}

#[test]
fn term_view_tiny_viewport_does_not_panic() {
    let snap = snapshot(&empty_rows());
    let fb = GameView::default().render(&snap, Viewport::new(5, 3));
    assert_eq!(fb.width(), 5);
}
