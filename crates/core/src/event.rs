// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observed analytics events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Unique identifier for an observed event
///
/// Ids are assigned by the store, monotonically increasing from 1 within one
/// test lifetime. Ordering by id is the authoritative observation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An analytics call observed from the application under test
///
/// Created once per decoded network call by the capture collaborator; never
/// mutated; removed only by a full store reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub payload: Value,
    /// Wall-clock time the capture collaborator handed the event over
    pub observed_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
