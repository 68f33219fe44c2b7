//! Terminal input module.
//!
//! Maps `crossterm` key events onto a cell cursor. The game itself only ever
//! sees "activate cell"; the cursor is how a keyboard picks that cell. Mouse
//! clicks are resolved to cells by the renderer, which knows the layout.

pub mod cursor;
pub mod map;

pub use color_lines_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit, CursorAction};
