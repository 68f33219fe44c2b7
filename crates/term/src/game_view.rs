//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each board cell is `cell_w` columns wide. A bead is drawn as `●` in the
//! middle column; the outer columns carry the selection ring. Everything
//! that blinks is driven by `snap.animation_tick`:
//!
//! - selected bead: ring always drawn, weight `(tick / SEL_F1) % SEL_F2`
//! - freshly spawned bead: visible when `(tick / SPAWN_F1) % SPAWN_F2 == 0`
//! - bead about to vanish: alternates with the highlight color on
//!   `(tick / DESPAWN_F1) % DESPAWN_F2`, even while it is also freshly spawned

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    Color, Position, DESPAWN_F1, DESPAWN_F2, SEL_F1, SEL_F2, SPAWN_F1, SPAWN_F2,
};

/// Bead colors, indexed by `Color::index()` (wrapping for larger palettes).
pub const PALETTE: [Rgb; 7] = [
    Rgb::new(255, 0, 0),    // red
    Rgb::new(255, 255, 0),  // yellow
    Rgb::new(160, 32, 240), // purple
    Rgb::new(0, 255, 0),    // green
    Rgb::new(0, 255, 255),  // cyan
    Rgb::new(0, 0, 255),    // blue
    Rgb::new(165, 42, 42),  // brown
];

/// Highlight used by the despawn blink.
pub const DESPAWN_COLOR: Rgb = Rgb::new(255, 192, 203);

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 95);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

const BEAD: char = '●';
const EMPTY: char = '·';

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

/// Where the board frame sits in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// A lightweight terminal renderer for the Color Lines board.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 3x1 leaves room for a ring on both sides of the bead.
        Self {
            cell_w: 3,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn layout(&self, size: u8, viewport: Viewport) -> Layout {
        let frame_w = (size as u16) * self.cell_w + 2;
        let frame_h = (size as u16) * self.cell_h + 2;
        // Score line sits under the frame.
        let total_h = frame_h + 1;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Board cell under terminal coordinate `(x, y)`, for mouse clicks.
    pub fn cell_at(&self, size: u8, viewport: Viewport, x: u16, y: u16) -> Option<Position> {
        let l = self.layout(size, viewport);
        let bx = x.checked_sub(l.start_x + 1)?;
        let by = y.checked_sub(l.start_y + 1)?;
        let col = bx / self.cell_w;
        let row = by / self.cell_h;
        if row >= size as u16 || col >= size as u16 {
            return None;
        }
        Some(Position::new(row as u8, col as u8))
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_cursor(snap, None, viewport, fb);
    }

    /// Like [`GameView::render_into`], also highlighting the keyboard cursor.
    pub fn render_into_with_cursor(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let l = self.layout(snap.size, viewport);
        let border = CellStyle::fg(Rgb::new(200, 200, 200), SCREEN_BG);
        self.draw_border(fb, l, border);

        // Hide the cursor while clicks are ignored.
        let show_cursor = snap.mode.accepts_input();

        for idx in 0..snap.cells.len() {
            let pos = Position::from_index(idx, snap.size);
            self.draw_cell(fb, l, snap, pos, show_cursor && cursor == Some(pos));
        }

        self.draw_score_line(fb, l, snap);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_cursor(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_cursor(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, l: Layout, style: CellStyle) {
        let (x, y, w, h) = (l.start_x, l.start_y, l.frame_w, l.frame_h);

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

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        l: Layout,
        snap: &GameSnapshot,
        pos: Position,
        under_cursor: bool,
    ) {
        let bg = if under_cursor { CURSOR_BG } else { BOARD_BG };
        let px = l.start_x + 1 + (pos.col as u16) * self.cell_w;
        let py = l.start_y + 1 + (pos.row as u16) * self.cell_h;
        let mid_x = px + self.cell_w / 2;
        let mid_y = py + self.cell_h / 2;
        let tick = snap.animation_tick;

        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::fg(BOARD_BG, bg));

        let empty = CellStyle {
            dim: true,
            ..CellStyle::fg(Rgb::new(90, 90, 100), bg)
        };
        let Some(color) = snap.cell(pos) else {
            fb.put_char(mid_x, mid_y, EMPTY, empty);
            return;
        };

        // Removal blink wins over the spawn blink.
        let fg = if snap.pending_removal.contains(&pos) {
            if (tick / DESPAWN_F1) % DESPAWN_F2 == 0 {
                bead_rgb(color)
            } else {
                DESPAWN_COLOR
            }
        } else if snap.recently_spawned.contains(&pos) && (tick / SPAWN_F1) % SPAWN_F2 != 0 {
            fb.put_char(mid_x, mid_y, EMPTY, empty);
            return;
        } else {
            bead_rgb(color)
        };
        let bead = CellStyle {
            bold: true,
            ..CellStyle::fg(fg, bg)
        };
        fb.put_char(mid_x, mid_y, BEAD, bead);

        // The ring is always shown; the phase only picks its weight.
        if snap.selected() == Some(pos) && mid_x > px {
            let (open, close) = match (tick / SEL_F1) % SEL_F2 {
                0 => ('(', ')'),
                1 => ('[', ']'),
                _ => ('▐', '▌'),
            };
            let style = CellStyle::fg(Rgb::new(255, 255, 255), bg);
            fb.put_char(mid_x - 1, mid_y, open, style);
            fb.put_char(mid_x + 1, mid_y, close, style);
        }
    }

    fn draw_score_line(&self, fb: &mut FrameBuffer, l: Layout, snap: &GameSnapshot) {
        let y = l.start_y + l.frame_h;
        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let x = fb.put_str(l.start_x, y, "Score: ", label);
        let x = fb.put_u32(x, y, snap.score, CellStyle::default());
        if snap.game_over {
            let over = CellStyle {
                bold: true,
                ..CellStyle::fg(Rgb::new(255, 80, 80), SCREEN_BG)
            };
            fb.put_str(x, y, " ** GAME OVER **", over);
        }
    }
}

/// Screen color for a bead.
pub fn bead_rgb(color: Color) -> Rgb {
    PALETTE[color.index() as usize % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_at_maps_frame_interior_only() {
        let view = GameView::default();
        let vp = Viewport::new(40, 20);
        let l = view.layout(9, vp);

        assert_eq!(view.cell_at(9, vp, l.start_x, l.start_y), None);
        assert_eq!(
            view.cell_at(9, vp, l.start_x + 1, l.start_y + 1),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            view.cell_at(9, vp, l.start_x + 1 + 3 * 4 + 2, l.start_y + 1 + 7),
            Some(Position::new(7, 4))
        );
        assert_eq!(
            view.cell_at(9, vp, l.start_x + l.frame_w - 1, l.start_y + 1),
            None
        );
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(bead_rgb(Color::new(0)), PALETTE[0]);
        assert_eq!(bead_rgb(Color::new(7)), PALETTE[0]);
    }
}
