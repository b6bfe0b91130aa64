// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use runlog::config::Config;
use runlog::db::{MemoryStore, TrackerDb};
use runlog::routes::create_router;
use runlog::AppState;
use std::sync::Arc;

/// Create a tracker over a fresh keyspace, returning the keyspace too so
/// tests can reach underneath the handle (e.g. to delete records out of
/// band).
#[allow(dead_code)]
pub fn test_db() -> (TrackerDb, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (TrackerDb::with_store(store.clone()), store)
}

/// Create a mock database handle (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> TrackerDb {
    TrackerDb::new_mock()
}

/// Create a test app over a fresh keyspace.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::default(),
        db: TrackerDb::new(),
    });

    (create_router(state.clone()), state)
}

/// Create a test app whose store is offline. Every endpoint that touches
/// the store should report 503.
#[allow(dead_code)]
pub fn create_offline_test_app() -> axum::Router {
    let state = Arc::new(AppState {
        config: Config::default(),
        db: test_db_offline(),
    });

    create_router(state)
}
