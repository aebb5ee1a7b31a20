// Copyright 2026 the Coppice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debouncing of event bursts.

/// Coalesces a burst of events into one firing after a quiet period.
///
/// [`Debouncer::note`] records an event and (re)schedules the deadline at
/// `now_ms + quiet_ms`; every further event pushes the deadline out. The
/// host polls [`Debouncer::fire`] from its loop; it returns `true` exactly
/// once per burst, after the quiet period has elapsed with no new events.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    quiet_ms: u64,
    deadline: Option<u64>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period in milliseconds.
    pub fn new(quiet_ms: u64) -> Self {
        Self {
            quiet_ms,
            deadline: None,
        }
    }

    /// The configured quiet period in milliseconds.
    pub fn quiet_ms(&self) -> u64 {
        self.quiet_ms
    }

    /// Record an event at `now_ms`, scheduling (or pushing out) the deadline.
    pub fn note(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms + self.quiet_ms);
    }

    /// Poll at `now_ms`. Returns `true` once per burst when the quiet period
    /// has fully elapsed; clears the pending deadline when it does.
    pub fn fire(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a firing is still scheduled.
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drop any scheduled firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
