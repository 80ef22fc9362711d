//! Deferred cosmetic transitions keyed by window id.
//!
//! At most one transition is pending per window. Scheduling a new one for the
//! same window cancels the old one, so a stale "opening finished" can never
//! land on top of a newer close (or the other way around).

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::constants::TRANSITION_DURATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Opening,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<R> {
    pub id: R,
    pub kind: TransitionKind,
    pub due: Instant,
}

#[derive(Debug, Clone)]
pub struct TransitionScheduler<R: Copy + Ord> {
    pending: BTreeMap<R, Transition<R>>,
    duration: Duration,
}

impl<R: Copy + Ord> Default for TransitionScheduler<R> {
    fn default() -> Self {
        Self::new(TRANSITION_DURATION)
    }
}

impl<R: Copy + Ord> TransitionScheduler<R> {
    pub fn new(duration: Duration) -> Self {
        Self {
            pending: BTreeMap::new(),
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Schedule `kind` for `id`, due `duration` after `now`. Returns the
    /// transition that was cancelled to make room, if any.
    pub fn schedule(&mut self, id: R, kind: TransitionKind, now: Instant) -> Option<Transition<R>> {
        let due = now + self.duration;
        self.pending.insert(id, Transition { id, kind, due })
    }

    pub fn cancel(&mut self, id: R) -> Option<Transition<R>> {
        self.pending.remove(&id)
    }

    pub fn pending(&self, id: R) -> Option<TransitionKind> {
        self.pending.get(&id).map(|t| t.kind)
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|t| t.due).min()
    }

    /// Remove and return every transition due at or before `now`, earliest
    /// first.
    pub fn take_due(&mut self, now: Instant) -> Vec<Transition<R>> {
        let due_ids: Vec<R> = self
            .pending
            .values()
            .filter(|t| t.due <= now)
            .map(|t| t.id)
            .collect();
        let mut fired: Vec<Transition<R>> = due_ids
            .into_iter()
            .filter_map(|id| self.pending.remove(&id))
            .collect();
        fired.sort_by_key(|t| t.due);
        fired
    }
}
