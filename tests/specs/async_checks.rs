//! Asynchronous checks and the join barrier.

use crate::prelude::fresh_checks;
use serde_json::json;
use stakeout_engine::{CaptureSink, CheckError};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn barrier_with_nothing_scheduled_is_a_no_op() {
    let (_store, checks) = fresh_checks();

    assert!(checks.await_all_event_checks().await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn actions_after_scheduling_satisfy_the_check() {
    let (store, checks) = fresh_checks();

    checks
        .check_has_event_async("purchase", None, Some(Duration::from_secs(5)))
        .unwrap();
    // the UI action that causes the event happens after scheduling
    store.capture("purchase", json!({"total": "12.50"}));

    assert!(checks.await_all_event_checks().await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn scheduled_checks_only_see_later_events() {
    let (store, checks) = fresh_checks();
    store.capture("login", json!({}));

    checks
        .check_has_event_async("login", None, Some(Duration::from_millis(600)))
        .unwrap();

    let error = checks.await_all_event_checks().await.unwrap_err();
    assert!(matches!(error, CheckError::AsyncCheckFailed(_)));
}

#[tokio::test(start_paused = true)]
async fn first_deferred_failure_wins_at_the_barrier() {
    let (store, checks) = fresh_checks();

    checks
        .check_has_event_async("never-sent", None, Some(Duration::from_millis(600)))
        .unwrap();
    checks
        .check_has_event_async("sent", None, Some(Duration::from_secs(2)))
        .unwrap();
    store.capture("sent", json!({}));

    match checks.await_all_event_checks().await {
        Err(CheckError::AsyncCheckFailed(miss)) => assert_eq!(miss.name, "never-sent"),
        other => panic!("expected a deferred failure, got {:?}", other),
    }

    // the barrier cleared the registry; a second join has nothing to raise
    assert!(checks.await_all_event_checks().await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn overlapping_watches_consume_one_event_each() {
    let (store, checks) = fresh_checks();

    checks
        .check_has_event_async("tap", None, Some(Duration::from_secs(5)))
        .unwrap();
    store.capture("tap", json!({"target": "a"}));
    checks
        .check_has_event_async("tap", None, Some(Duration::from_secs(5)))
        .unwrap();
    store.capture("tap", json!({"target": "b"}));

    assert!(checks.await_all_event_checks().await.is_ok());
    let snapshot = store.snapshot();
    assert!(snapshot.iter().all(|e| store.is_consumed(e.id)));
}
