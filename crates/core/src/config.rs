// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Verification engine configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for event checks
///
/// Durations accept humantime strings ("500ms", "30s") when deserialized
/// from the surrounding project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    /// Interval between store scans inside a watch loop
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    /// Timeout applied when a check does not specify one
    #[serde(with = "humantime_serde")]
    pub default_timeout: Duration,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            default_timeout: Duration::from_secs(30),
        }
    }
}

impl ChecksConfig {
    /// Parse from a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
