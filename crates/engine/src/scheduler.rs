// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background event checks with deferred failure reporting

use crate::error::CheckError;
use crate::watcher::{EventWatcher, WatchResult, POLL_INTERVAL};
use stakeout_core::{EventStore, Pattern};
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A scheduled-but-not-yet-joined background check
struct ScheduledCheck {
    name: String,
    handle: JoinHandle<WatchResult>,
}

/// Launches non-blocking background watches and joins their outcomes
///
/// Every scheduled check must eventually be collected with [`await_all`]:
/// checks that are never joined are lost together with any deferred failure
/// they recorded. That is a caller obligation, not something the scheduler
/// corrects.
///
/// [`await_all`]: AsyncCheckScheduler::await_all
pub struct AsyncCheckScheduler {
    store: EventStore,
    poll_interval: Duration,
    pending: Mutex<Vec<ScheduledCheck>>,
}

impl AsyncCheckScheduler {
    pub fn new(store: EventStore) -> Self {
        Self {
            store,
            poll_interval: POLL_INTERVAL,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Launch a background watch without blocking the caller
    ///
    /// The current store watermark becomes the watch's baseline: events
    /// already in the store are ignored even if unconsumed, so overlapping
    /// checks each observe only events caused after they were scheduled.
    pub fn schedule(&self, name: impl Into<String>, pattern: Option<Pattern>, timeout: Duration) {
        let name = name.into();
        let baseline = self.store.watermark();
        tracing::debug!(
            name = %name,
            baseline,
            timeout = ?timeout,
            "scheduling async event check"
        );

        let watcher = EventWatcher::new(self.store.clone(), name.clone(), pattern, timeout)
            .with_baseline(baseline)
            .with_poll_interval(self.poll_interval);
        let handle = tokio::spawn(watcher.run());

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.push(ScheduledCheck { name, handle });
    }

    /// Number of scheduled-but-not-yet-joined checks
    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Join barrier over every scheduled check
    ///
    /// Awaits all checks in scheduling order before raising anything, then
    /// surfaces the first recorded failure. The registry is cleared
    /// regardless of outcome. With nothing scheduled this returns
    /// immediately.
    pub async fn await_all(&self) -> Result<(), CheckError> {
        let pending = {
            let mut guard = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *guard)
        };

        let mut first_failure: Option<CheckError> = None;
        for check in pending {
            match check.handle.await {
                Ok(WatchResult::Matched { event_id }) => {
                    tracing::debug!(name = %check.name, event_id = %event_id, "async check matched");
                }
                Ok(WatchResult::TimedOut(timeout)) => {
                    tracing::warn!(name = %check.name, "async check recorded a failure");
                    if first_failure.is_none() {
                        first_failure = Some(CheckError::AsyncCheckFailed(timeout));
                    }
                }
                Err(join_error) => {
                    if first_failure.is_none() {
                        first_failure = Some(CheckError::Join(join_error));
                    }
                }
            }
        }

        match first_failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
