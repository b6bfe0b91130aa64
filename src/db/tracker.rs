// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tracker database handle with typed operations.
//!
//! Provides high-level operations for:
//! - Users (registration with a unique-username index)
//! - Runs (immutable session records with per-user history)
//! - Leaderboard (global distance ranking, reconstructed at read time)
//!
//! Writes that touch several keys go through a [`WriteBatch`] so readers
//! never observe a half-written run or registration.

use std::sync::Arc;

use crate::db::fields;
use crate::db::keys;
use crate::db::kv::{MemoryStore, WriteBatch};
use crate::error::AppError;
use crate::models::run::average_pace_for;
use crate::models::{leaderboard, LeaderboardEntry, NewRun, Run, User};

/// Tracker database client.
#[derive(Clone)]
pub struct TrackerDb {
    store: Option<Arc<MemoryStore>>,
}

impl TrackerDb {
    /// Open a fresh keyspace.
    pub fn new() -> Self {
        Self {
            store: Some(Arc::new(MemoryStore::new())),
        }
    }

    /// Wrap an existing keyspace. Tests use this to reach underneath the
    /// handle, e.g. to delete records out of band.
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All store operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { store: None }
    }

    /// Whether the handle has a backing store.
    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    /// Helper to get the store or return an error if offline.
    fn get_store(&self) -> Result<&MemoryStore, AppError> {
        self.store
            .as_deref()
            .ok_or_else(|| AppError::Unavailable("Store not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Register a new user and return the allocated user id.
    ///
    /// The credential arrives already hashed; it is stored opaquely. The
    /// username is claimed through the index key inside the same batch
    /// that writes the record, so two racing registrations cannot both
    /// win the name.
    pub fn register(&self, username: &str, password_hash: &str) -> Result<u64, AppError> {
        let store = self.get_store()?;

        // Fast path for the common duplicate. The reservation below
        // still closes the race between two concurrent registrations.
        if store.lookup(&keys::username(username)).is_some() {
            return Err(AppError::DuplicateUsername(username.to_string()));
        }

        let user_id = store.incr(&keys::sequence(keys::USER_IDS));
        let user = User {
            user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            registered_at: chrono::Utc::now().to_rfc3339(),
        };

        let batch = WriteBatch::new()
            .reserve(keys::username(username), user_id.to_string())
            .put_fields(keys::user(user_id), user.to_fields());
        store
            .apply(batch)
            .map_err(|_| AppError::DuplicateUsername(username.to_string()))?;

        tracing::info!(user_id, username, "User registered");
        Ok(user_id)
    }

    /// Get a user by id.
    pub fn get_user(&self, user_id: u64) -> Result<Option<User>, AppError> {
        let store = self.get_store()?;
        Ok(store
            .fields(&keys::user(user_id))
            .map(|fields| User::from_fields(&fields)))
    }

    // ─── Run Operations ──────────────────────────────────────────

    /// Log a completed run for `user_id` and return the allocated run id.
    ///
    /// Negative inputs clamp to zero and the submitted pace is discarded
    /// in favor of the server's own computation. The run record, the
    /// history entry and the leaderboard score land in one batch.
    pub fn log_run(&self, user_id: u64, new_run: NewRun) -> Result<u64, AppError> {
        let store = self.get_store()?;

        if !store.exists(&keys::user(user_id)) {
            return Err(AppError::UnknownUser(user_id));
        }

        let NewRun {
            duration_sec,
            distance_km,
            average_pace: _,
            route_data,
            total_steps,
        } = new_run;

        let duration_sec = duration_sec.max(0) as u64;
        let total_steps = total_steps.max(0) as u64;
        let distance_km = if distance_km.is_finite() {
            distance_km.max(0.0)
        } else {
            0.0
        };

        let run_id = store.incr(&keys::sequence(keys::RUN_IDS));
        let run = Run {
            run_id,
            user_id,
            recorded_at: chrono::Utc::now().to_rfc3339(),
            duration_sec,
            distance_km,
            average_pace: average_pace_for(duration_sec, distance_km),
            route_data,
            total_steps,
        };

        let batch = WriteBatch::new()
            .put_fields(keys::run(run_id), run.to_fields())
            .push_front(keys::user_runs(user_id), run_id.to_string())
            .ranked_set(
                keys::LEADERBOARD,
                leaderboard::member(user_id, run_id),
                run.distance_km,
            );
        // No reservations in this batch, so a conflict here means the
        // engine itself misbehaved.
        store.apply(batch).map_err(anyhow::Error::from)?;

        tracing::info!(
            user_id,
            run_id,
            distance_km = run.distance_km,
            average_pace = run.average_pace,
            "Run logged"
        );
        Ok(run_id)
    }

    /// Get a run by id, including its verbatim route data.
    pub fn get_run(&self, run_id: u64) -> Result<Option<Run>, AppError> {
        let store = self.get_store()?;
        Ok(store
            .fields(&keys::run(run_id))
            .map(|fields| Run::from_fields(&fields)))
    }

    /// Get a user's runs, newest first, at most `limit` when given.
    ///
    /// History entries whose run record cannot be resolved are skipped.
    /// An unknown user simply has an empty history.
    pub fn get_user_runs(&self, user_id: u64, limit: Option<usize>) -> Result<Vec<Run>, AppError> {
        let store = self.get_store()?;
        let runs = store
            .list_range(&keys::user_runs(user_id), limit)
            .iter()
            .filter_map(|raw| raw.parse::<u64>().ok())
            .filter_map(|run_id| store.fields(&keys::run(run_id)))
            .map(|fields| Run::from_fields(&fields))
            .collect();
        Ok(runs)
    }

    // ─── Leaderboard Operations ──────────────────────────────────

    /// Get the top `limit` leaderboard entries, longest distance first.
    ///
    /// Each ranked member is expanded against the stored records. A
    /// missing user record degrades to a placeholder name; a missing run
    /// record drops the entry, since a row without its run data would
    /// claim a performance nothing backs up.
    pub fn get_leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, AppError> {
        let store = self.get_store()?;
        let ranked = store.ranked_top(keys::LEADERBOARD, limit);
        let mut entries = Vec::with_capacity(ranked.len());

        for (raw_member, score) in ranked {
            let (user_id, run_id) = match leaderboard::parse_member(&raw_member) {
                Some(ids) => ids,
                None => {
                    tracing::warn!(member = %raw_member, "Skipping malformed leaderboard member");
                    continue;
                }
            };

            let run_fields =
                match store.fields_select(&keys::run(run_id), &["average_pace", "recorded_at"]) {
                    Some(values) => values,
                    None => {
                        tracing::warn!(user_id, run_id, "Leaderboard entry has no run record");
                        continue;
                    }
                };
            let average_pace = fields::f64_value(run_fields.first().and_then(|v| v.as_deref()));
            let recorded_at = fields::text_value(run_fields.get(1).and_then(|v| v.as_deref()));

            let username = store
                .fields_select(&keys::user(user_id), &["username"])
                .and_then(|values| values.into_iter().next().flatten())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| leaderboard::placeholder_name(user_id));

            entries.push(LeaderboardEntry {
                user_id,
                run_id,
                username,
                distance_km: score,
                average_pace,
                recorded_at,
            });
        }

        Ok(entries)
    }
}

impl Default for TrackerDb {
    fn default() -> Self {
        Self::new()
    }
}
