// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consumer-facing verification surface
//!
//! The step-authoring layer drives event verification through
//! [`EventChecks`]; one instance exists per test, built around the test's
//! event store.

use crate::error::CheckError;
use crate::scheduler::AsyncCheckScheduler;
use crate::watcher::{EventWatcher, WatchResult};
use stakeout_core::{ChecksConfig, Event, EventId, EventStore, Pattern, PatternSource};
use std::time::Duration;

pub struct EventChecks {
    store: EventStore,
    scheduler: AsyncCheckScheduler,
    config: ChecksConfig,
}

impl EventChecks {
    pub fn new(store: EventStore) -> Self {
        Self::with_config(store, ChecksConfig::default())
    }

    pub fn with_config(store: EventStore, config: ChecksConfig) -> Self {
        let scheduler =
            AsyncCheckScheduler::new(store.clone()).with_poll_interval(config.poll_interval);
        Self {
            store,
            scheduler,
            config,
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// Block the calling step until a matching event is consumed
    ///
    /// A malformed pattern fails immediately, before any waiting. Without a
    /// timeout the configured default applies.
    pub async fn check_has_event(
        &self,
        name: &str,
        pattern: Option<&PatternSource>,
        timeout: Option<Duration>,
    ) -> Result<EventId, CheckError> {
        let pattern = self.load_pattern(pattern)?;
        let timeout = timeout.unwrap_or(self.config.default_timeout);

        let watcher = EventWatcher::new(self.store.clone(), name, pattern, timeout)
            .with_poll_interval(self.config.poll_interval);
        match watcher.run().await {
            WatchResult::Matched { event_id } => Ok(event_id),
            WatchResult::TimedOut(miss) => Err(CheckError::NotFound(miss)),
        }
    }

    /// Schedule a background check; never raises for a missing event
    ///
    /// Only pattern problems surface here, at call time. The deferred
    /// outcome is collected by [`await_all_event_checks`]; a test that skips
    /// the barrier silently loses any recorded failure.
    ///
    /// [`await_all_event_checks`]: EventChecks::await_all_event_checks
    pub fn check_has_event_async(
        &self,
        name: &str,
        pattern: Option<&PatternSource>,
        timeout: Option<Duration>,
    ) -> Result<(), CheckError> {
        let pattern = self.load_pattern(pattern)?;
        let timeout = timeout.unwrap_or(self.config.default_timeout);
        self.scheduler.schedule(name, pattern, timeout);
        Ok(())
    }

    /// Join barrier over every scheduled background check
    ///
    /// Called once per test, after the last step; raises the first deferred
    /// failure, if any, once every check has finished.
    pub async fn await_all_event_checks(&self) -> Result<(), CheckError> {
        self.scheduler.await_all().await
    }

    /// Number of observed events with the given name, consumed or not
    pub fn event_count(&self, name: &str) -> usize {
        self.store.count_named(name)
    }

    /// All observed events in ascending id order
    pub fn events(&self) -> Vec<Event> {
        self.store.snapshot()
    }

    fn load_pattern(&self, source: Option<&PatternSource>) -> Result<Option<Pattern>, CheckError> {
        Ok(source.map(|s| s.load()).transpose()?)
    }
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
