//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of Color Lines and the state machine that
//! sequences a turn. It has no dependencies on terminals or input devices:
//!
//! - **Deterministic**: a seed fixes every spawn, and time is passed in by
//!   the caller as a millisecond counter
//! - **Testable**: every timing transition can be driven from a test
//! - **Portable**: the renderer only ever reads a [`GameSnapshot`]
//!
//! # Module Structure
//!
//! - [`board`]: square grid, random spawning, BFS pathfinding, run detection
//! - [`controller`]: the [`GameController`] state machine
//! - [`scheduler`]: time-bucketed queue of self-scheduled events
//! - [`event`]: events carried on the controller channel
//! - [`snapshot`]: read-only state for rendering
//! - [`event_log`]: optional JSON-lines record of dispatched events
//! - [`rng`]: seeded LCG
//!
//! # Game Rules
//!
//! - Three beads of random colors appear on random free cells
//! - Select a bead, then an empty cell reachable through empty cells; the
//!   bead slides there one cell at a time
//! - Five or more beads of one color in a row, column or diagonal vanish and
//!   score; otherwise three new beads appear
//! - The game ends when the board is full
//!
//! # Example
//!
//! ```
//! use color_lines_core::{Event, GameController};
//! use color_lines_core::types::GameConfig;
//!
//! let mut game = GameController::new(&GameConfig::default());
//!
//! // The opening spawn fires at t=0.
//! let events = game.settle(0);
//! assert!(events.contains(&Event::Spawn));
//! assert_eq!(game.snapshot().bead_count(), 3);
//!
//! // Select one of the beads.
//! let (pos, _) = game.snapshot().beads().next().unwrap();
//! game.activate(16, pos);
//! assert_eq!(game.selected(), Some(pos));
//! ```

pub mod board;
pub mod controller;
pub mod event;
pub mod event_log;
pub mod rng;
pub mod scheduler;
pub mod snapshot;

pub use color_lines_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, MatchOutcome, ScoreRules};
pub use controller::{GameController, Mode, VisualState};
pub use event::Event;
pub use event_log::EventLog;
pub use rng::SimpleRng;
pub use scheduler::{ScheduledEvent, Scheduler};
pub use snapshot::GameSnapshot;
