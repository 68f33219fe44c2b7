//! Board module - manages the bead grid
//!
//! The board is a square grid where each cell is either empty or holds a bead
//! of some [`Color`]. Uses a flat row-major vector; the side length is fixed
//! when the board is built and never changes afterwards.
//!
//! Besides storage the board owns the three rules that only depend on the
//! grid itself: random spawning, the empty-cell pathfinder used for moves,
//! and run detection with scoring. It has no notion of time or turns.

use std::collections::{BTreeSet, VecDeque};

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{Cell, Color, GameConfig, Position};

/// The four run axes, each as one of its two directions.
///
/// Horizontal, vertical, then the two diagonals. Order matters: later
/// qualifying axes in a single check score with a larger multiplier.
const AXES: [(i16, i16); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Pathfinder neighbor order: up, down, left, right.
const STEPS: [(i16, i16); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Scoring parameters for run detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRules {
    /// Minimum run length, center bead included.
    pub min_run: usize,
    pub score_factor: f64,
    /// Compounded once per bead beyond `min_run`.
    pub bonus_length: f64,
    /// Compounded once per qualifying axis within one check.
    pub bonus_axis: f64,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

impl From<&GameConfig> for ScoreRules {
    fn from(cfg: &GameConfig) -> Self {
        Self {
            min_run: cfg.min_run,
            score_factor: cfg.score_factor,
            bonus_length: cfg.bonus_length,
            bonus_axis: cfg.bonus_axis,
        }
    }
}

/// Result of run detection for one bead.
///
/// `removed` is either empty or contains the bead that was checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub removed: BTreeSet<Position>,
    pub score_delta: u32,
}

impl MatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    /// Union another outcome into this one.
    pub fn merge(&mut self, other: MatchOutcome) {
        self.removed.extend(other.removed);
        self.score_delta = self.score_delta.saturating_add(other.score_delta);
    }
}

/// The game board - `size` x `size` cells in a flat vector
#[derive(Debug, Clone)]
pub struct Board {
    size: u8,
    palette_size: u8,
    rules: ScoreRules,
    /// Flat vector of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
    score: u32,
    rng: SimpleRng,
}

impl Board {
    /// Create an empty board with default scoring rules
    pub fn new(size: u8, palette_size: u8, seed: u32) -> Self {
        Self::with_rules(size, palette_size, seed, ScoreRules::default())
    }

    pub fn with_rules(size: u8, palette_size: u8, seed: u32, rules: ScoreRules) -> Self {
        let len = (size as usize) * (size as usize);
        Self {
            size,
            palette_size: palette_size.max(1),
            rules,
            cells: vec![None; len],
            score: 0,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn from_config(cfg: &GameConfig) -> Self {
        Self::with_rules(
            cfg.board_size,
            cfg.palette_size,
            cfg.seed,
            ScoreRules::from(cfg),
        )
    }

    /// Build a board from a text diagram, one string per row.
    ///
    /// `.` is an empty cell and a digit `0`-`9` is a bead of that color.
    /// The side length is the number of rows; rows shorter than that are
    /// padded with empty cells and extra characters are ignored.
    ///
    /// ```
    /// use color_lines_core::Board;
    /// use color_lines_core::types::{Color, Position};
    ///
    /// let board = Board::from_diagram(&["1..", ".2.", "..."]);
    /// assert_eq!(board.get(Position::new(1, 1)), Some(Some(Color::new(2))));
    /// assert_eq!(board.free_cells().len(), 7);
    /// ```
    pub fn from_diagram(rows: &[&str]) -> Self {
        let size = rows.len().min(u8::MAX as usize) as u8;
        let mut board = Self::new(size, crate::types::DEFAULT_PALETTE_SIZE, 1);
        for (r, line) in rows.iter().take(size as usize).enumerate() {
            for (c, ch) in line.chars().take(size as usize).enumerate() {
                if let Some(d) = ch.to_digit(10) {
                    board.set(Position::new(r as u8, c as u8), Some(Color::new(d as u8)));
                }
            }
        }
        board
    }

    /// Side length of the board
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn palette_size(&self) -> u8 {
        self.palette_size
    }

    pub fn rules(&self) -> &ScoreRules {
        &self.rules
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Add to the score. The score never decreases outside of [`Board::erase`].
    pub fn add_score(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
    }

    /// Get cell at `pos`
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if !pos.in_bounds(self.size) {
            return None;
        }
        Some(self.cells[pos.index(self.size)])
    }

    /// Set cell at `pos`
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        if !pos.in_bounds(self.size) {
            return false;
        }
        let idx = pos.index(self.size);
        self.cells[idx] = cell;
        true
    }

    /// Check if position is within bounds and empty
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(None))
    }

    /// Check if position is within bounds and holds a bead
    pub fn is_occupied(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(Some(_)))
    }

    /// Swap the contents of two cells. Out-of-bounds positions are ignored.
    pub fn swap(&mut self, a: Position, b: Position) {
        if a.in_bounds(self.size) && b.in_bounds(self.size) {
            self.cells.swap(a.index(self.size), b.index(self.size));
        }
    }

    /// Get a reference to the internal cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the grid and reset the score
    pub fn erase(&mut self) {
        self.cells.fill(None);
        self.score = 0;
    }

    /// All empty positions, row-major.
    pub fn free_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| Position::from_index(idx, self.size))
            .collect()
    }

    /// Place up to `n` random beads on random free cells.
    ///
    /// Stops early once the board is full. Returns the positions actually
    /// filled, in placement order.
    pub fn spawn(&mut self, n: usize) -> Vec<Position> {
        let mut placed = Vec::with_capacity(n);
        for _ in 0..n {
            let free = self.free_cells();
            let Some(&pos) = self.rng.choose(&free) else {
                break;
            };
            let color = Color::new(self.rng.next_range(self.palette_size as u32) as u8);
            self.set(pos, Some(color));
            placed.push(pos);
        }
        placed
    }

    fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        STEPS
            .iter()
            .filter_map(|&(dr, dc)| pos.offset(dr, dc, self.size))
            .collect()
    }

    /// Shortest route from `src` to `dst` through empty cells.
    ///
    /// Both endpoints are included. `src` may hold a bead (it is the one
    /// being moved), `dst` must be empty. Returns `None` when `src == dst`
    /// or no route exists.
    pub fn path(&self, src: Position, dst: Position) -> Option<Vec<Position>> {
        if src == dst || !src.in_bounds(self.size) || !self.is_empty(dst) {
            return None;
        }

        let n = self.cells.len();
        let mut visited = vec![false; n];
        let mut parent: Vec<Option<usize>> = vec![None; n];
        let mut queue = VecDeque::new();

        let src_idx = src.index(self.size);
        let dst_idx = dst.index(self.size);
        visited[src_idx] = true;
        queue.push_back(src);

        while let Some(cur) = queue.pop_front() {
            let cur_idx = cur.index(self.size);
            if cur_idx == dst_idx {
                break;
            }
            for next in self.neighbors(cur) {
                let idx = next.index(self.size);
                if visited[idx] || self.cells[idx].is_some() {
                    continue;
                }
                visited[idx] = true;
                parent[idx] = Some(cur_idx);
                queue.push_back(next);
            }
        }

        if !visited[dst_idx] {
            return None;
        }

        let mut route = Vec::new();
        let mut cur = Some(dst_idx);
        while let Some(idx) = cur {
            route.push(Position::from_index(idx, self.size));
            cur = parent[idx];
        }
        route.reverse();
        Some(route)
    }

    /// Run detection and scoring for the bead at `pos`.
    ///
    /// Does not touch the grid or the score; the caller applies the outcome.
    /// An empty `pos` yields an empty outcome.
    pub fn check(&self, pos: Position) -> MatchOutcome {
        let Some(Some(color)) = self.get(pos) else {
            return MatchOutcome::default();
        };

        let rules = &self.rules;
        let mut removed = BTreeSet::new();
        let mut factor = 1.0_f64;
        let mut score = 0.0_f64;

        for &(dr, dc) in AXES.iter() {
            let mut matched: Vec<Position> = Vec::new();
            for sign in [1, -1] {
                let mut cur = pos;
                while let Some(next) = cur.offset(dr * sign, dc * sign, self.size) {
                    if self.get(next) != Some(Some(color)) {
                        break;
                    }
                    matched.push(next);
                    cur = next;
                }
            }

            if matched.len() + 1 >= rules.min_run {
                let len = matched.len();
                let extra = len.saturating_sub(rules.min_run.saturating_sub(1)) as i32;
                score += rules.score_factor
                    * factor
                    * (len + 1) as f64
                    * rules.bonus_length.powi(extra);
                factor *= rules.bonus_axis;
                removed.extend(matched);
            }
        }

        if !removed.is_empty() {
            removed.insert(pos);
        }

        MatchOutcome {
            removed,
            score_delta: score as u32,
        }
    }
}
