//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no I/O, making them usable in any context
//! (game logic, terminal rendering, input mapping, event logging).
//!
//! # Board
//!
//! The board is a square grid, 9x9 by default. Cells are addressed by
//! [`Position`] as `(row, col)` with `(0, 0)` in the top-left corner.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 40 | Animation tick interval |
//! | `SPAWN_ANIMATION_MS` | 1000 | Blink window for freshly spawned beads |
//! | `DESPAWN_ANIMATION_MS` | 750 | Blink window before matched beads vanish |
//! | `MOVE_DELAY_MS` | 150 | Delay between single-cell steps of a moving bead |
//!
//! # Scoring
//!
//! A run of `MIN_RUN` or more same-colored beads along one axis is removed.
//! Each qualifying axis scores
//! `SCORE_FACTOR * factor * len * BONUS_LENGTH^(len - MIN_RUN)`, where `factor`
//! grows by `BONUS_AXIS` for every further axis cleared by the same bead.
//!
//! # Examples
//!
//! ```
//! use color_lines_types::{Color, Position, DEFAULT_BOARD_SIZE};
//!
//! let pos = Position::new(2, 3);
//! assert_eq!(pos.offset(-1, 1, DEFAULT_BOARD_SIZE), Some(Position::new(1, 4)));
//! assert_eq!(pos.offset(-3, 0, DEFAULT_BOARD_SIZE), None);
//!
//! assert_eq!(Color::new(4).index(), 4);
//! ```

pub mod config;

pub use config::{ConfigError, GameConfig};

use serde::Serialize;

/// Default board side length (9x9)
pub const DEFAULT_BOARD_SIZE: u8 = 9;

/// Default number of bead colors
pub const DEFAULT_PALETTE_SIZE: u8 = 7;

/// Beads placed after every move that clears nothing
pub const SPAWN_BEADS: usize = 3;

/// Minimum run length (center included) that gets removed
pub const MIN_RUN: usize = 5;

/// Points per bead in a qualifying run
pub const SCORE_FACTOR: f64 = 10.0;

/// Per-bead bonus for runs longer than `MIN_RUN`
pub const BONUS_LENGTH: f64 = 1.1;

/// Multiplier applied after each qualifying axis in a single check
pub const BONUS_AXIS: f64 = 1.2;

/// Animation tick interval in milliseconds
pub const TICK_MS: u64 = 40;

/// Spawn blink window in milliseconds
pub const SPAWN_ANIMATION_MS: u64 = 1000;

/// Despawn blink window in milliseconds.
///
/// Kept shorter than `SPAWN_ANIMATION_MS`.
pub const DESPAWN_ANIMATION_MS: u64 = 750;

/// Delay between steps of a moving bead in milliseconds
pub const MOVE_DELAY_MS: u64 = 150;

/// Selection blink: `(tick / SEL_F1) % SEL_F2` picks the ring thickness
pub const SEL_F1: u32 = 5;
pub const SEL_F2: u32 = 3;

/// Spawn blink: bead is drawn when `(tick / SPAWN_F1) % SPAWN_F2 == 0`
pub const SPAWN_F1: u32 = 6;
pub const SPAWN_F2: u32 = 2;

/// Despawn blink: bead color alternates with the highlight color
pub const DESPAWN_F1: u32 = 1;
pub const DESPAWN_F2: u32 = 2;

/// A bead color, an index into the palette.
///
/// Beads only ever compare by color equality; what the index looks like on
/// screen is up to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Color(u8);

impl Color {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell holding a bead of that color
pub type Cell = Option<Color>;

/// A board coordinate: `row` grows downward, `col` grows rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Step by `(dr, dc)`, returning `None` when the result leaves a
    /// `size`x`size` board.
    pub fn offset(self, dr: i16, dc: i16, size: u8) -> Option<Self> {
        let row = self.row as i16 + dr;
        let col = self.col as i16 + dc;
        if row < 0 || col < 0 || row >= size as i16 || col >= size as i16 {
            return None;
        }
        Some(Self::new(row as u8, col as u8))
    }

    /// Row-major flat index on a `size`x`size` board.
    #[inline(always)]
    pub fn index(self, size: u8) -> usize {
        (self.row as usize) * (size as usize) + (self.col as usize)
    }

    /// Inverse of [`Position::index`].
    #[inline(always)]
    pub fn from_index(idx: usize, size: u8) -> Self {
        let size = size as usize;
        Self::new((idx / size) as u8, (idx % size) as u8)
    }

    pub fn in_bounds(self, size: u8) -> bool {
        self.row < size && self.col < size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_defaults() {
        assert_eq!(DEFAULT_BOARD_SIZE, 9);
        assert_eq!(DEFAULT_PALETTE_SIZE, 7);
        assert_eq!(SPAWN_BEADS, 3);
        assert_eq!(MIN_RUN, 5);
        assert_eq!(TICK_MS, 40);
        assert_eq!(MOVE_DELAY_MS, 150);
        assert!(DESPAWN_ANIMATION_MS < SPAWN_ANIMATION_MS);
    }

    #[test]
    fn position_offset_stays_on_board() {
        let p = Position::new(0, 8);
        assert_eq!(p.offset(0, 1, 9), None);
        assert_eq!(p.offset(-1, 0, 9), None);
        assert_eq!(p.offset(1, -1, 9), Some(Position::new(1, 7)));
    }

    #[test]
    fn position_index_roundtrip_corners() {
        assert_eq!(Position::new(0, 0).index(9), 0);
        assert_eq!(Position::new(8, 8).index(9), 80);
        assert_eq!(Position::from_index(10, 9), Position::new(1, 1));
    }
}
