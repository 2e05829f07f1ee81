// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test-scoped append-only event log with exactly-once consumption

use crate::event::{Event, EventId};
use chrono::Utc;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Append-only log of observed events plus a consumption ledger
///
/// One store exists per test: created and reset by the external lifecycle
/// controller and threaded through watchers by handle. `Clone` shares the
/// underlying state. Appends from the capture collaborator interleave freely
/// with reads and consumption marking; the only cross-watcher discipline is
/// the atomic [`try_consume`].
///
/// Scans are O(stored events) per poll tick. That is acceptable at test-scale
/// event volumes and is left as-is so matching order stays strictly by id.
///
/// [`try_consume`]: EventStore::try_consume
#[derive(Debug)]
pub struct EventStore {
    inner: Arc<Mutex<StoreInner>>,
}

#[derive(Debug)]
struct StoreInner {
    events: Vec<Event>,
    consumed: HashSet<EventId>,
    next_id: u64,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                events: Vec::new(),
                consumed: HashSet::new(),
                next_id: 1,
            })),
        }
    }

    /// Append an observed event and return its id
    ///
    /// Fire-and-forget from the producer's point of view: never fails and
    /// never blocks beyond the internal lock hold.
    pub fn append(&self, name: impl Into<String>, payload: Value) -> EventId {
        let name = name.into();
        let mut inner = self.lock();
        let id = EventId(inner.next_id);
        inner.next_id += 1;
        inner.events.push(Event {
            id,
            name: name.clone(),
            payload,
            observed_at: Utc::now(),
        });
        tracing::trace!(event_id = %id, name = %name, "event appended");
        id
    }

    /// Point-in-time view of the log in ascending id order
    ///
    /// Matching passes scan a snapshot so events appended mid-scan cannot
    /// affect an in-flight pattern test.
    pub fn snapshot(&self) -> Vec<Event> {
        self.lock().events.clone()
    }

    /// Atomically mark an event consumed
    ///
    /// Returns false if a racing watcher consumed it first. A consumed id
    /// never un-consumes.
    pub fn try_consume(&self, id: EventId) -> bool {
        self.lock().consumed.insert(id)
    }

    /// Whether an event was already consumed by a successful match
    pub fn is_consumed(&self, id: EventId) -> bool {
        self.lock().consumed.contains(&id)
    }

    /// Highest id assigned so far, 0 when nothing has been appended
    pub fn watermark(&self) -> u64 {
        self.lock().next_id - 1
    }

    /// Number of stored events, consumed or not
    pub fn len(&self) -> usize {
        self.lock().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().events.is_empty()
    }

    /// Count stored events with the given name, consumed or not
    pub fn count_named(&self, name: &str) -> usize {
        self.lock().events.iter().filter(|e| e.name == name).count()
    }

    /// Clear the log, the consumption ledger, and the id counter
    ///
    /// Invoked once per test by the lifecycle controller, before any step
    /// runs.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.events.clear();
        inner.consumed.clear();
        inner.next_id = 1;
        tracing::debug!("event store reset");
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
