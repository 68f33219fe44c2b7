//! Controller module - turn sequencing as an event-driven state machine
//!
//! The controller owns the [`Board`], the transient animation state and a
//! [`Scheduler`]. External "activate cell" input and the controller's own
//! timer events share one ordered channel. Each loop pass takes at most one
//! external input, dispatches one event from the channel and then moves every
//! timer event that has come due onto the channel.
//!
//! Mode-independent events (tick, spawn, unspawn, despawn, undespawn) are
//! handled the same way in every mode. `Activate` and `Go` are routed to the
//! handler of the current [`Mode`]:
//!
//! | Mode | Handles | Effect |
//! |------|---------|--------|
//! | `AwaitingSelection` | `Activate` | select a bead, or start a move along a path |
//! | `ExecutingMove` | `Go` | slide one step, or resolve matches at the destination |
//! | `Suspended` | nothing | matched beads are blinking out |
//! | `AwaitingRestart` | `Activate` | any cell restarts the game |

use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;

use crate::board::{Board, MatchOutcome};
use crate::event::Event;
use crate::event_log::EventLog;
use crate::scheduler::Scheduler;
use crate::snapshot::GameSnapshot;
use crate::types::{GameConfig, Position};

/// Controller state. Exactly one is active and it decides which input matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mode {
    AwaitingSelection { selected: Option<Position> },
    ExecutingMove { target: Position },
    Suspended,
    AwaitingRestart,
}

impl Mode {
    pub fn selected(&self) -> Option<Position> {
        match self {
            Mode::AwaitingSelection { selected } => *selected,
            _ => None,
        }
    }

    /// Whether activate input does anything in this mode.
    pub fn accepts_input(&self) -> bool {
        matches!(
            self,
            Mode::AwaitingSelection { .. } | Mode::AwaitingRestart
        )
    }
}

/// Animation-facing state, read by the renderer and written only here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualState {
    pub recently_spawned: BTreeSet<Position>,
    /// Matched beads waiting to vanish; not selectable, not traversable.
    pub pending_removal: BTreeSet<Position>,
    pub game_over: bool,
    pub animation_tick: u32,
}

/// Timer durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timings {
    tick: u64,
    spawn: u64,
    despawn: u64,
    step: u64,
}

impl From<&GameConfig> for Timings {
    fn from(cfg: &GameConfig) -> Self {
        Self {
            tick: cfg.tick_ms,
            spawn: cfg.spawn_animation_ms,
            despawn: cfg.despawn_animation_ms,
            step: cfg.move_delay_ms,
        }
    }
}

#[derive(Debug)]
pub struct GameController {
    board: Board,
    mode: Mode,
    visual: VisualState,
    scheduler: Scheduler,
    channel: VecDeque<Event>,
    timings: Timings,
    spawn_count: usize,
    /// The tick chain reschedules itself forever; start it once.
    ticking: bool,
    /// Increments on every init, restart included.
    episode_id: u32,
    event_log: Option<EventLog>,
}

impl GameController {
    /// Create a controller and run init at time 0.
    pub fn new(config: &GameConfig) -> Self {
        let mut ctl = Self::idle(config, Board::from_config(config));
        ctl.init();
        ctl
    }

    /// Continue play on an existing position.
    ///
    /// The board keeps its beads and score; there is no opening spawn. The
    /// controller awaits a selection with the tick chain running.
    pub fn from_board(config: &GameConfig, board: Board) -> Self {
        let mut ctl = Self::idle(config, board);
        ctl.mode = Mode::AwaitingSelection { selected: None };
        ctl.episode_id = 1;
        ctl.ticking = true;
        ctl.scheduler.schedule(Event::Tick, 0);
        ctl
    }

    fn idle(config: &GameConfig, board: Board) -> Self {
        Self {
            board,
            mode: Mode::Suspended,
            visual: VisualState::default(),
            scheduler: Scheduler::new(),
            channel: VecDeque::new(),
            timings: Timings::from(config),
            spawn_count: config.spawn_count,
            ticking: false,
            episode_id: 0,
            event_log: None,
        }
    }

    pub fn with_event_log(mut self, log: EventLog) -> Self {
        self.event_log = Some(log);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn selected(&self) -> Option<Position> {
        self.mode.selected()
    }

    pub fn visual(&self) -> &VisualState {
        &self.visual
    }

    pub fn game_over(&self) -> bool {
        self.visual.game_over
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Events already due and waiting on the channel.
    pub fn queued(&self) -> usize {
        self.channel.len()
    }

    /// Milliseconds from `now_ms` until something needs dispatching.
    ///
    /// Zero while the channel holds events; `None` when nothing is pending.
    pub fn idle_for(&self, now_ms: u64) -> Option<u64> {
        if !self.channel.is_empty() {
            return Some(0);
        }
        self.scheduler
            .next_fire_at()
            .map(|at| at.saturating_sub(now_ms))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.size = self.board.size();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.score = self.board.score();
        out.mode = self.mode.clone();
        out.recently_spawned.clone_from(&self.visual.recently_spawned);
        out.pending_removal.clone_from(&self.visual.pending_removal);
        out.game_over = self.visual.game_over;
        out.animation_tick = self.visual.animation_tick;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// One loop pass at time `now_ms`.
    ///
    /// `input` is the external activation polled this pass, if any. Returns
    /// the event that was dispatched.
    pub fn step(&mut self, now_ms: u64, input: Option<Position>) -> Option<Event> {
        self.scheduler.advance_to(now_ms);
        if let Some(pos) = input {
            self.channel.push_back(Event::Activate { pos });
        }

        let dispatched = self.channel.pop_front();
        if let Some(event) = &dispatched {
            self.dispatch(event.clone());
            if let Some(log) = self.event_log.as_mut() {
                log.record(
                    now_ms,
                    self.episode_id,
                    event,
                    &self.mode,
                    self.board.score(),
                );
            }
        }

        let due = self.scheduler.poll_due(now_ms);
        self.channel.extend(due);
        dispatched
    }

    /// Run passes at `now_ms` without input until the channel is drained.
    ///
    /// Returns the dispatched events in order.
    pub fn settle(&mut self, now_ms: u64) -> Vec<Event> {
        let mut seen = Vec::new();
        // Flush anything already due before the first pass.
        let due = self.scheduler.poll_due(now_ms);
        self.channel.extend(due);
        while !self.channel.is_empty() {
            if let Some(ev) = self.step(now_ms, None) {
                seen.push(ev);
            }
        }
        seen
    }

    /// Queue an activation and settle everything it triggers at `now_ms`.
    pub fn activate(&mut self, now_ms: u64, pos: Position) -> Vec<Event> {
        let mut seen = Vec::new();
        if let Some(ev) = self.step(now_ms, Some(pos)) {
            seen.push(ev);
        }
        seen.extend(self.settle(now_ms));
        seen
    }

    fn dispatch(&mut self, event: Event) {
        match event {
            Event::Tick => self.on_tick(),
            Event::Spawn => self.on_spawn(),
            Event::Unspawn => self.on_unspawn(),
            Event::Despawn => self.on_despawn(),
            Event::Undespawn => self.on_undespawn(),
            Event::Activate { .. } | Event::Go { .. } => match self.mode {
                Mode::AwaitingSelection { selected } => self.on_select(selected, event),
                Mode::ExecutingMove { .. } => self.on_go(event),
                Mode::Suspended => {}
                Mode::AwaitingRestart => self.on_restart(event),
            },
        }
    }

    fn init(&mut self) {
        self.board.erase();
        self.visual = VisualState::default();
        self.mode = Mode::AwaitingSelection { selected: None };
        self.episode_id = self.episode_id.wrapping_add(1);

        if !self.ticking {
            self.ticking = true;
            self.scheduler.schedule(Event::Tick, 0);
        }
        self.scheduler.schedule(Event::Spawn, 0);
    }

    fn on_select(&mut self, selected: Option<Position>, event: Event) {
        let Event::Activate { pos } = event else {
            return;
        };
        if self.visual.pending_removal.contains(&pos) {
            return;
        }

        if let Some(src) = selected {
            if let Some(path) = self.board.path(src, pos) {
                self.mode = Mode::ExecutingMove { target: pos };
                self.scheduler.schedule(Event::Go { path }, 0);
                return;
            }
        }

        if self.board.is_occupied(pos) {
            self.mode = Mode::AwaitingSelection {
                selected: Some(pos),
            };
        }
    }

    fn on_go(&mut self, event: Event) {
        let Event::Go { path } = event else {
            return;
        };

        match path.as_slice() {
            [] => {}
            [dest] => {
                let outcome = self.board.check(*dest);
                if outcome.is_empty() {
                    self.scheduler.schedule(Event::Spawn, 0);
                    self.mode = Mode::AwaitingSelection { selected: None };
                } else {
                    self.apply_matches(outcome);
                    self.scheduler.schedule(Event::Despawn, 0);
                }
            }
            [from, to, ..] => {
                self.board.swap(*from, *to);
                self.scheduler.schedule(
                    Event::Go {
                        path: path[1..].to_vec(),
                    },
                    self.timings.step,
                );
            }
        }
    }

    fn on_restart(&mut self, event: Event) {
        if let Event::Activate { .. } = event {
            self.init();
        }
    }

    fn on_tick(&mut self) {
        self.visual.animation_tick = self.visual.animation_tick.wrapping_add(1);
        self.scheduler.schedule(Event::Tick, self.timings.tick);
    }

    fn on_spawn(&mut self) {
        let placed = self.board.spawn(self.spawn_count);

        let mut matches = MatchOutcome::default();
        for &pos in &placed {
            matches.merge(self.board.check(pos));
        }
        self.visual.recently_spawned = placed.into_iter().collect();

        if !matches.is_empty() {
            self.apply_matches(matches);
            self.scheduler
                .schedule(Event::Undespawn, self.timings.despawn);
        }
        self.scheduler.schedule(Event::Unspawn, self.timings.spawn);
    }

    fn on_unspawn(&mut self) {
        self.visual.recently_spawned.clear();
        // Pending removals are about to free cells, so the board is not
        // finished yet whatever the timer order.
        if self.visual.pending_removal.is_empty() && self.board.free_cells().is_empty() {
            self.visual.game_over = true;
            self.mode = Mode::AwaitingRestart;
        }
    }

    fn on_despawn(&mut self) {
        self.scheduler
            .schedule(Event::Undespawn, self.timings.despawn);
    }

    fn on_undespawn(&mut self) {
        for pos in std::mem::take(&mut self.visual.pending_removal) {
            self.board.set(pos, None);
        }
        self.mode = Mode::AwaitingSelection { selected: None };
    }

    fn apply_matches(&mut self, outcome: MatchOutcome) {
        self.board.add_score(outcome.score_delta);
        self.visual.pending_removal.extend(outcome.removed);
        self.mode = Mode::Suspended;
    }
}
