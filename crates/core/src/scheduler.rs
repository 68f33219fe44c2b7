//! Scheduler module - self-scheduled events keyed by fire time
//!
//! Events wait in time buckets until their fire time has passed; a bucket
//! keeps its events in the order they were scheduled, so equal fire times are
//! delivered first-scheduled-first. Nothing can be cancelled once scheduled.
//!
//! Time is an absolute millisecond counter supplied by the caller, which keeps
//! the scheduler independent of the wall clock (tests drive it directly).

use std::collections::BTreeMap;

use crate::event::Event;

/// An event waiting for its fire time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub event: Event,
    pub fire_at: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: BTreeMap<u64, Vec<Event>>,
    now_ms: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading used as the base for new schedules.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Advance the clock. The clock never runs backwards.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Queue `event` to fire `delay_ms` after the current clock reading.
    pub fn schedule(&mut self, event: Event, delay_ms: u64) {
        let fire_at = self.now_ms.saturating_add(delay_ms);
        self.pending.entry(fire_at).or_default().push(event);
    }

    /// Remove and return every event due at `now_ms`, earliest first.
    pub fn poll_due(&mut self, now_ms: u64) -> Vec<Event> {
        self.advance_to(now_ms);
        let later = match self.now_ms.checked_add(1) {
            Some(cutoff) => self.pending.split_off(&cutoff),
            None => BTreeMap::new(),
        };
        let due = std::mem::replace(&mut self.pending, later);
        due.into_values().flatten().collect()
    }

    /// Fire time of the earliest pending event.
    pub fn next_fire_at(&self) -> Option<u64> {
        self.pending.keys().next().copied()
    }

    /// Pending events in delivery order, without removing them.
    pub fn pending(&self) -> Vec<ScheduledEvent> {
        self.pending
            .iter()
            .flat_map(|(&fire_at, events)| {
                events.iter().map(move |event| ScheduledEvent {
                    event: event.clone(),
                    fire_at,
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
