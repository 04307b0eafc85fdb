//! One-shot deferred actions.
//!
//! The controller never sleeps. When it wants something to happen later it
//! hands a [`Deferred`] to a [`Scheduler`], and the host delivers it back via
//! [`crate::controller::Event::Deferred`] once the delay has elapsed. Nothing
//! scheduled can be cancelled.

use std::time::Duration;

/// Work the controller can defer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    CloseSidebar,
}

pub trait Scheduler {
    /// Queue `action` to run once after `delay`.
    fn schedule_once(&mut self, delay: Duration, action: Deferred);
}

/// A virtual-clock scheduler. Time only moves when [`ManualScheduler::advance`]
/// is called.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    pending: Vec<(Duration, u64, Deferred)>,
    next_seq: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and return every action that came due, ordered
    /// by due time and then by scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<Deferred> {
        self.now += by;
        let now = self.now;
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(at, _, _)| *at <= now);
        self.pending = rest;
        due.sort_by_key(|(at, seq, _)| (*at, *seq));
        due.into_iter().map(|(_, _, action)| action).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&mut self, delay: Duration, action: Deferred) {
        self.pending.push((self.now + delay, self.next_seq, action));
        self.next_seq += 1;
    }
}
