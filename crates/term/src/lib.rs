//! Terminal "game renderer" module.
//!
//! Renders a `core::GameSnapshot` into a simple framebuffer that is then
//! flushed to the terminal. No widgets or layout engine: the board is small
//! and fixed, so the view positions every glyph itself.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Only rewrite the rows that changed between frames
//! - Map mouse coordinates back to board cells with the same layout used for drawing

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use color_lines_core as core;
pub use color_lines_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{bead_rgb, AnchorY, GameView, Viewport, DESPAWN_COLOR, PALETTE};
pub use render_throttle::RenderThrottle;
pub use renderer::{dirty_rows, encode_rows_into, TerminalRenderer};
