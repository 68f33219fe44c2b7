//! Events flowing through the controller's channel.

use serde::Serialize;

use crate::types::Position;

/// One event on the controller channel.
///
/// `Activate` is the only external input; every other variant is scheduled
/// by the controller itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// The player activated a cell (already resolved from screen coordinates).
    Activate { pos: Position },
    /// Animation heartbeat.
    Tick,
    /// Place new beads.
    Spawn,
    /// End of the spawn blink window.
    Unspawn,
    /// Start of the removal blink window after a move.
    Despawn,
    /// End of the removal blink window: matched beads vanish.
    Undespawn,
    /// Advance a moving bead along the remaining path.
    Go { path: Vec<Position> },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Activate { .. } => "activate",
            Event::Tick => "tick",
            Event::Spawn => "spawn",
            Event::Unspawn => "unspawn",
            Event::Despawn => "despawn",
            Event::Undespawn => "undespawn",
            Event::Go { .. } => "go",
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Event::Activate { .. })
    }
}
