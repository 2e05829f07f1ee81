//! Shared helpers for behavioral specs.

use stakeout_core::EventStore;
use stakeout_engine::EventChecks;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once; RUST_LOG controls verbosity.
pub fn init_tracing() {
    TRACING.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_test_writer())
            .init();
    });
}

/// A fresh store/checks pair, reset the way the lifecycle controller would
/// at test start.
pub fn fresh_checks() -> (EventStore, EventChecks) {
    init_tracing();
    let store = EventStore::new();
    store.reset();
    let checks = EventChecks::new(store.clone());
    (store, checks)
}
