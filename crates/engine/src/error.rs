// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the verification engine

use stakeout_core::PatternError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// What a watch saw before giving up
///
/// Retained on failure solely for the human-readable message: the event
/// name, the pattern text, the elapsed time, and the candidate count from
/// the last scan.
#[derive(Debug, Clone)]
pub struct WatchTimeout {
    pub name: String,
    pub pattern: Option<String>,
    pub waited: Duration,
    pub seen: usize,
}

impl fmt::Display for WatchTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no {:?} event matched", self.name)?;
        if let Some(pattern) = &self.pattern {
            write!(f, " pattern {}", pattern)?;
        }
        // millisecond precision keeps the message readable
        let waited = Duration::from_millis(self.waited.as_millis() as u64);
        write!(
            f,
            " within {}; {} candidate(s) seen",
            humantime::format_duration(waited),
            self.seen
        )
    }
}

impl std::error::Error for WatchTimeout {}

/// Errors raised by the verification surface
#[derive(Debug, Error)]
pub enum CheckError {
    /// Sync check missed its deadline; fatal to the calling step
    #[error("event not found: {0}")]
    NotFound(WatchTimeout),

    /// Deferred async failure, surfaced only by the join barrier
    #[error("async event check failed: {0}")]
    AsyncCheckFailed(WatchTimeout),

    /// The supplied pattern was invalid; raised before any waiting begins
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A background watch task panicked
    #[error("event check task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
