// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural patterns for event payload verification
//!
//! A pattern is a JSON object supplied by the test author. Leaf string values
//! carry a small grammar; non-leaf values describe structural containment
//! rather than full equality.
//!
//! Leaf grammar:
//! - `"*"` matches any leaf value
//! - `""` matches only the empty string
//! - `"~rest"` matches a leaf whose text contains `rest`
//! - anything else matches on exact leaf text equality
//!
//! Non-string primitive leaves compare by their compact JSON text, so the
//! pattern `"3"` matches the number `3`. No other leaf operators exist.

use crate::error::PatternError;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Where a pattern comes from: inline JSON text or a JSON file
#[derive(Debug, Clone)]
pub enum PatternSource {
    Inline(String),
    File(PathBuf),
}

impl PatternSource {
    /// Read and parse the pattern, failing fast on malformed input
    pub fn load(&self) -> Result<Pattern, PatternError> {
        match self {
            PatternSource::Inline(text) => Pattern::parse(text),
            PatternSource::File(path) => {
                let text = fs::read_to_string(path).map_err(|source| PatternError::FileRead {
                    path: path.clone(),
                    source,
                })?;
                Pattern::parse(&text)
            }
        }
    }
}

/// A parsed pattern with a JSON object at the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    root: Map<String, Value>,
}

impl Pattern {
    /// Parse pattern text; the root must be a JSON object
    pub fn parse(text: &str) -> Result<Self, PatternError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, PatternError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(PatternError::NotAnObject {
                found: json_type(&other),
            }),
        }
    }

    /// Deep key-existence search over an event payload
    ///
    /// Each root key is searched for independently, anywhere in the payload
    /// tree; the payload matches iff every key is found with a matching
    /// value. Keys need not share a nesting level or any structural
    /// relationship. An empty pattern matches any payload.
    pub fn matches_payload(&self, payload: &Value) -> bool {
        self.root
            .iter()
            .all(|(key, expected)| find_key(payload, key, expected))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.root.clone()))
    }
}

/// Structural nested match of an event value against a pattern value
///
/// Precedence: leaf rules first, then re-parse of string-encoded JSON, then
/// object subset, then array containment. Any other shape combination is no
/// match. Extra keys in event objects are ignored; pattern array elements
/// match any event element, without positional alignment.
pub fn value_matches(event: &Value, pattern: &Value) -> bool {
    if let (Some(actual), Some(expected)) = (leaf_text(event), leaf_text(pattern)) {
        return leaf_matches(&actual, &expected);
    }

    // Some apps double-encode nested JSON as a string leaf. Re-parse and
    // retry; a parse failure simply means no match.
    if let Value::String(text) = event {
        return match serde_json::from_str::<Value>(text) {
            Ok(reparsed) => value_matches(&reparsed, pattern),
            Err(_) => false,
        };
    }

    match (event, pattern) {
        (Value::Object(event_obj), Value::Object(pattern_obj)) => {
            pattern_obj.iter().all(|(key, expected)| {
                event_obj
                    .get(key)
                    .is_some_and(|actual| value_matches(actual, expected))
            })
        }
        (Value::Array(event_items), Value::Array(pattern_items)) => {
            pattern_items.iter().all(|expected| {
                event_items
                    .iter()
                    .any(|actual| value_matches(actual, expected))
            })
        }
        _ => false,
    }
}

/// Leaf grammar evaluation on raw leaf text
pub fn leaf_matches(actual: &str, expected: &str) -> bool {
    if expected == "*" {
        return true;
    }
    if expected.is_empty() {
        return actual.is_empty();
    }
    if let Some(needle) = expected.strip_prefix('~') {
        return actual.contains(needle);
    }
    actual == expected
}

/// Raw text of a primitive leaf; None for objects and arrays
fn leaf_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Walk the payload tree for any field named `key` with a matching value
///
/// Descends through objects and arrays only; string-encoded JSON is
/// re-parsed by [`value_matches`] once a candidate value is located, not
/// during the walk itself. A non-matching occurrence does not stop the
/// search.
fn find_key(value: &Value, key: &str, expected: &Value) -> bool {
    match value {
        Value::Object(map) => {
            if map
                .get(key)
                .is_some_and(|actual| value_matches(actual, expected))
            {
                return true;
            }
            map.values().any(|nested| find_key(nested, key, expected))
        }
        Value::Array(items) => items.iter().any(|item| find_key(item, key, expected)),
        _ => false,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
