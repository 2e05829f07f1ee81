// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for stakeout-core

use std::path::PathBuf;
use thiserror::Error;

/// Errors from parsing or loading a pattern
///
/// All of these surface at call time, before any waiting begins.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("pattern root must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
    #[error("failed to read pattern file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors from loading verification configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid checks configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
