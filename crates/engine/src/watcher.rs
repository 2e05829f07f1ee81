// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timeout-bounded event watching
//!
//! A watch scans store snapshots in ascending id order at a fixed poll
//! interval until a name-and-pattern match is consumed or the deadline
//! passes. All observation is by polling; there is no event-driven wakeup
//! and no external cancellation.

use crate::error::WatchTimeout;
use stakeout_core::{EventId, EventStore, Pattern};
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Interval between store scans
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Terminal state of a watch
#[derive(Debug, Clone)]
pub enum WatchResult {
    /// An event matched and was consumed
    Matched { event_id: EventId },
    /// The deadline passed without a consumable match
    TimedOut(WatchTimeout),
}

impl WatchResult {
    pub fn is_matched(&self) -> bool {
        matches!(self, WatchResult::Matched { .. })
    }

    pub fn event_id(&self) -> Option<EventId> {
        match self {
            WatchResult::Matched { event_id } => Some(*event_id),
            WatchResult::TimedOut(_) => None,
        }
    }
}

/// A single watch over the event store
///
/// Used directly for synchronous checks (the calling step awaits [`run`])
/// and spawned as a background task for asynchronous ones.
///
/// [`run`]: EventWatcher::run
#[derive(Debug, Clone)]
pub struct EventWatcher {
    store: EventStore,
    name: String,
    pattern: Option<Pattern>,
    timeout: Duration,
    poll_interval: Duration,
    baseline: u64,
}

impl EventWatcher {
    pub fn new(
        store: EventStore,
        name: impl Into<String>,
        pattern: Option<Pattern>,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            name: name.into(),
            pattern,
            timeout,
            poll_interval: POLL_INTERVAL,
            baseline: 0,
        }
    }

    /// Only consider events appended after the given watermark
    pub fn with_baseline(mut self, watermark: u64) -> Self {
        self.baseline = watermark;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Run the watch to completion
    ///
    /// Always scans at least once, even with a zero timeout. When no
    /// candidate matches a tick, sleeps one poll interval and rescans until
    /// the deadline passes.
    pub async fn run(self) -> WatchResult {
        let started = Instant::now();
        let deadline = started + self.timeout;

        loop {
            let snapshot = self.store.snapshot();
            let mut seen = 0usize;

            for event in &snapshot {
                if event.id.0 <= self.baseline || event.name != self.name {
                    continue;
                }
                seen += 1;
                if self.store.is_consumed(event.id) {
                    continue;
                }
                if let Some(pattern) = &self.pattern {
                    if !pattern.matches_payload(&event.payload) {
                        continue;
                    }
                }
                // A racing watcher may still win between the match and the
                // consume; that is a miss for this tick, not a failure.
                if self.store.try_consume(event.id) {
                    tracing::debug!(
                        name = %self.name,
                        event_id = %event.id,
                        "event check matched"
                    );
                    return WatchResult::Matched { event_id: event.id };
                }
                tracing::debug!(
                    name = %self.name,
                    event_id = %event.id,
                    "lost consume race, continuing scan"
                );
            }

            if Instant::now() >= deadline {
                tracing::warn!(name = %self.name, seen, "event check timed out");
                return WatchResult::TimedOut(WatchTimeout {
                    name: self.name.clone(),
                    pattern: self.pattern.as_ref().map(|p| p.to_string()),
                    waited: started.elapsed(),
                    seen,
                });
            }

            sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
