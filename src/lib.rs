//! Color Lines (workspace facade crate).
//!
//! Re-exports `color_lines::{types, core, input, term}` while the
//! implementation lives in dedicated crates under `crates/`.

pub use color_lines_core as core;
pub use color_lines_input as input;
pub use color_lines_term as term;
pub use color_lines_types as types;
