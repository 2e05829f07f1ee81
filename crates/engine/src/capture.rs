// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Producer-facing seam for the capture collaborator

use serde_json::Value;
use stakeout_core::EventStore;

/// Where decoded network traffic lands
///
/// The capture proxy calls this for every analytics event it decodes.
/// Fire-and-forget: capturing never blocks on watchers and never fails
/// observably to the producer.
pub trait CaptureSink: Send + Sync {
    fn capture(&self, name: &str, payload: Value);
}

impl CaptureSink for EventStore {
    fn capture(&self, name: &str, payload: Value) {
        self.append(name, payload);
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
