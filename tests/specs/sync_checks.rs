//! Synchronous check behavior, end to end.

use crate::prelude::fresh_checks;
use serde_json::json;
use stakeout_core::PatternSource;
use stakeout_engine::{CaptureSink, CheckError};
use std::time::Duration;

fn inline(text: &str) -> PatternSource {
    PatternSource::Inline(text.to_string())
}

#[tokio::test(start_paused = true)]
async fn missing_event_raises_not_found_after_the_timeout() {
    let (_store, checks) = fresh_checks();

    let started = tokio::time::Instant::now();
    let error = checks
        .check_has_event("login", None, Some(Duration::from_secs(1)))
        .await
        .unwrap_err();

    assert!(matches!(error, CheckError::NotFound(_)));
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn deep_search_matches_a_nested_price() {
    let (store, checks) = fresh_checks();
    store.capture("purchase", json!({"items": [{"price": "120"}]}));

    let source = inline(r#"{"price": "~120"}"#);
    let id = checks
        .check_has_event("purchase", Some(&source), Some(Duration::from_secs(5)))
        .await
        .unwrap();

    assert!(store.is_consumed(id));
}

#[tokio::test(start_paused = true)]
async fn check_waits_for_a_late_producer() {
    let (store, checks) = fresh_checks();

    let producer = store.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        producer.capture("screen_view", json!({"screen": "checkout"}));
    });

    let source = inline(r#"{"screen": "checkout"}"#);
    let result = checks
        .check_has_event("screen_view", Some(&source), Some(Duration::from_secs(10)))
        .await;

    assert!(result.is_ok());
}

#[tokio::test(start_paused = true)]
async fn pattern_match_leaves_earlier_events_for_later_checks() {
    let (store, checks) = fresh_checks();
    store.capture("view", json!({"screen": "home"}));
    store.capture("view", json!({"screen": "checkout"}));

    let source = inline(r#"{"screen": "checkout"}"#);
    let matched = checks
        .check_has_event("view", Some(&source), Some(Duration::from_secs(1)))
        .await
        .unwrap();
    assert_eq!(matched.0, 2);

    let leftover = checks
        .check_has_event("view", None, Some(Duration::from_secs(1)))
        .await
        .unwrap();
    assert_eq!(leftover.0, 1);
}

#[tokio::test(start_paused = true)]
async fn numeric_leaves_match_their_json_text() {
    let (store, checks) = fresh_checks();
    store.capture("purchase", json!({"qty": 3}));

    let source = inline(r#"{"qty": "3"}"#);
    let result = checks
        .check_has_event("purchase", Some(&source), Some(Duration::from_secs(1)))
        .await;

    assert!(result.is_ok());
}

#[tokio::test(start_paused = true)]
async fn diagnostics_list_every_capture() {
    let (store, checks) = fresh_checks();
    store.capture("view", json!({"screen": "home"}));
    store.capture("tap", json!({"target": "buy"}));
    store.capture("view", json!({"screen": "cart"}));

    assert_eq!(checks.event_count("view"), 2);
    let names: Vec<String> = checks.events().into_iter().map(|e| e.name).collect();
    similar_asserts::assert_eq!(names, vec!["view", "tap", "view"]);
}
