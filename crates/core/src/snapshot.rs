use std::collections::BTreeSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::controller::Mode;
use crate::types::{Cell, Color, Position, DEFAULT_BOARD_SIZE};

/// Read-only view of the game for renderers, taken once per loop pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub size: u8,
    /// Row-major cells, `size * size` long.
    pub cells: Vec<Cell>,
    pub score: u32,
    pub mode: Mode,
    pub recently_spawned: BTreeSet<Position>,
    pub pending_removal: BTreeSet<Position>,
    pub game_over: bool,
    pub animation_tick: u32,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn cell(&self, pos: Position) -> Cell {
        if !pos.in_bounds(self.size) {
            return None;
        }
        self.cells.get(pos.index(self.size)).copied().flatten()
    }

    pub fn selected(&self) -> Option<Position> {
        self.mode.selected()
    }

    /// Whether anything on screen blinks with the animation tick.
    pub fn is_animating(&self) -> bool {
        self.selected().is_some()
            || !self.recently_spawned.is_empty()
            || !self.pending_removal.is_empty()
            || matches!(self.mode, Mode::ExecutingMove { .. })
    }

    /// Hash of everything except the animation tick.
    pub fn fingerprint(&self) -> u64 {
        let mut h = DefaultHasher::new();
        self.size.hash(&mut h);
        self.cells.hash(&mut h);
        self.score.hash(&mut h);
        self.mode.hash(&mut h);
        self.recently_spawned.hash(&mut h);
        self.pending_removal.hash(&mut h);
        self.game_over.hash(&mut h);
        self.episode_id.hash(&mut h);
        h.finish()
    }

    pub fn bead_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate `(position, color)` for every bead.
    pub fn beads(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, cell)| {
            cell.map(|color| (Position::from_index(idx, self.size), color))
        })
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let size = DEFAULT_BOARD_SIZE;
        Self {
            size,
            cells: vec![None; (size as usize) * (size as usize)],
            score: 0,
            mode: Mode::AwaitingSelection { selected: None },
            recently_spawned: BTreeSet::new(),
            pending_removal: BTreeSet::new(),
            game_over: false,
            animation_tick: 0,
            episode_id: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_ignores_animation_tick() {
        let a = GameSnapshot::default();
        let mut b = a.clone();
        b.animation_tick = 99;
        assert_eq!(a.fingerprint(), b.fingerprint());

        b.score = 10;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn beads_lists_occupied_cells() {
        let mut s = GameSnapshot::default();
        s.cells[Position::new(2, 1).index(s.size)] = Some(Color::new(3));
        let beads: Vec<_> = s.beads().collect();
        assert_eq!(beads, vec![(Position::new(2, 1), Color::new(3))]);
        assert_eq!(s.bead_count(), 1);
        assert_eq!(s.cell(Position::new(2, 1)), Some(Color::new(3)));
        assert_eq!(s.cell(Position::new(20, 1)), None);
    }

    #[test]
    fn idle_board_is_static() {
        let mut s = GameSnapshot::default();
        assert!(!s.is_animating());
        s.mode = Mode::AwaitingSelection {
            selected: Some(Position::new(0, 0)),
        };
        assert!(s.is_animating());
    }
}
