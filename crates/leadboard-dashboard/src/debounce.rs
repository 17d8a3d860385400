// SPDX-FileCopyrightText: 2026 Leadboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trailing-edge debounce policy.
//!
//! Time is passed in rather than read, so the policy is testable without a
//! runtime. The session driver feeds it `tokio::time::Instant`s.

use std::time::Duration;

use tokio::time::Instant;

/// Holds the most recent value until no new value has arrived for `quiet`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// Takes the pending value once its quiet period has fully elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline()? > now {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[test]
    fn emits_only_last_value_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push("j", start);
        debouncer.push("jo", start + Duration::from_millis(50));
        debouncer.push("joh", start + Duration::from_millis(100));

        assert_eq!(debouncer.poll(start + Duration::from_millis(399)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(400)), Some("joh"));
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn deadline_tracks_latest_push() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        assert!(debouncer.deadline().is_none());
        debouncer.push(1, start);
        debouncer.push(2, start + Duration::from_millis(120));
        assert_eq!(debouncer.deadline(), Some(start + Duration::from_millis(420)));
    }
}
