//! Virtual-time timer queue.
//!
//! The session never reads a wall clock. Time only moves when the caller
//! advances it, and timers fire in `(due, id)` order. Every timer is tagged
//! with the round it belongs to so a round transition can drop all of them
//! at once.

use game_types::RoundId;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// One-second countdown step.
    Tick,
    /// Fire the next simulated guess.
    Guess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub round_id: RoundId,
    pub due: Duration,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<(Duration, TimerId), ScheduledTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, kind: TimerKind, round_id: RoundId) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let due = self.now.saturating_add(delay);
        self.queue.insert(
            (due, id),
            ScheduledTimer {
                id,
                kind,
                round_id,
                due,
            },
        );
        id
    }

    /// Cancel every pending timer of a round, returning how many were dropped.
    pub fn cancel_round(&mut self, round_id: RoundId) -> usize {
        let before = self.queue.len();
        self.queue.retain(|_, t| t.round_id != round_id);
        before - self.queue.len()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Remove and return the earliest timer due at or before `horizon`,
    /// moving the clock to its due time.
    pub fn pop_due(&mut self, horizon: Duration) -> Option<ScheduledTimer> {
        let (&key, _) = self.queue.iter().next()?;
        if key.0 > horizon {
            return None;
        }
        let timer = self.queue.remove(&key)?;
        self.now = self.now.max(timer.due);
        Some(timer)
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }
}
