//! Keyboard cell cursor.

use crate::map::CursorAction;
use crate::types::Position;

/// A cell cursor clamped to a square board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
    size: u8,
}

impl Cursor {
    /// Start in the middle of a `size`x`size` board.
    pub fn new(size: u8) -> Self {
        let mid = size / 2;
        Self {
            pos: Position::new(mid, mid),
            size,
        }
    }

    pub fn pos(&self) -> Position {
        self.pos
    }

    /// Jump to `pos` (e.g. after a mouse click). Off-board positions are ignored.
    pub fn set(&mut self, pos: Position) {
        if pos.in_bounds(self.size) {
            self.pos = pos;
        }
    }

    /// Apply an action. Returns the cell to activate, if the action was one.
    pub fn apply(&mut self, action: CursorAction) -> Option<Position> {
        let (dr, dc) = match action {
            CursorAction::Up => (-1, 0),
            CursorAction::Down => (1, 0),
            CursorAction::Left => (0, -1),
            CursorAction::Right => (0, 1),
            CursorAction::Activate => return Some(self.pos),
        };
        if let Some(next) = self.pos.offset(dr, dc, self.size) {
            self.pos = next;
        }
        None
    }
}
