// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Runlog: a run-tracking backend over an in-memory keyspace.
//!
//! This crate provides the backend API for registering users, logging
//! run sessions and serving per-user history plus a global distance
//! leaderboard.

pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod models;
pub mod routes;

use config::Config;
use db::TrackerDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: TrackerDb,
}
