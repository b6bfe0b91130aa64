// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API over the tracker operations.

use crate::error::{AppError, Result};
use crate::models::{LeaderboardEntry, NewRun, Run};
use crate::{format, AppState};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use validator::Validate;

/// Leaderboard rows served when the caller does not ask for a count.
const DEFAULT_LEADERBOARD_LIMIT: usize = 5;
const MAX_LEADERBOARD_LIMIT: usize = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", post(register))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}/runs", get(get_user_runs))
        .route("/api/runs", post(log_run))
        .route("/api/runs/{id}", get(get_run))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/dashboard", get(get_dashboard))
}

// ─── Registration ────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct RegisterPayload {
    #[validate(length(min = 1, max = 32, message = "username must be 1-32 characters"))]
    username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    password: String,
}

/// Response for a successful registration.
#[derive(Serialize)]
pub struct RegisterResponse {
    pub user_id: u64,
}

/// Register a new user.
///
/// The password is hashed here at the boundary; everything below only
/// ever sees the digest.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Json<RegisterResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let password_hash = hex::encode(Sha256::digest(payload.password.as_bytes()));
    let user_id = state.db.register(&payload.username, &password_hash)?;

    Ok(Json(RegisterResponse { user_id }))
}

// ─── User Profile ────────────────────────────────────────────

/// Public user profile. The credential hash never leaves the server.
#[derive(Serialize)]
pub struct UserResponse {
    pub user_id: u64,
    pub username: String,
    pub registered_at: String,
}

/// Get a user's profile.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<u64>,
) -> Result<Json<UserResponse>> {
    let user = state
        .db
        .get_user(user_id)?
        .ok_or(AppError::UnknownUser(user_id))?;

    Ok(Json(UserResponse {
        user_id: user.user_id,
        username: user.username,
        registered_at: user.registered_at,
    }))
}

// ─── Runs ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LogRunPayload {
    user_id: u64,
    duration_sec: i64,
    distance_km: f64,
    /// Accepted for wire compatibility; the server recomputes the pace.
    average_pace: f64,
    route_data: Vec<serde_json::Value>,
    total_steps: i64,
}

/// Response for a logged run.
#[derive(Serialize)]
pub struct LogRunResponse {
    pub run_id: u64,
}

/// Log a completed run.
async fn log_run(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LogRunPayload>,
) -> Result<Json<LogRunResponse>> {
    let run_id = state.db.log_run(
        payload.user_id,
        NewRun {
            duration_sec: payload.duration_sec,
            distance_km: payload.distance_km,
            average_pace: payload.average_pace,
            route_data: payload.route_data,
            total_steps: payload.total_steps,
        },
    )?;

    Ok(Json(LogRunResponse { run_id }))
}

/// Full run detail including the verbatim route points.
#[derive(Serialize)]
pub struct RunDetailResponse {
    pub run_id: u64,
    pub user_id: u64,
    pub recorded_at: String,
    pub duration_sec: u64,
    pub duration_display: String,
    pub distance_km: f64,
    pub average_pace: f64,
    pub pace_display: String,
    pub total_steps: u64,
    pub route_data: Vec<serde_json::Value>,
}

/// Get one run with its route.
async fn get_run(
    State(state): State<Arc<AppState>>,
    Path(run_id): Path<u64>,
) -> Result<Json<RunDetailResponse>> {
    let run = state
        .db
        .get_run(run_id)?
        .ok_or_else(|| AppError::NotFound(format!("Run {} not found", run_id)))?;

    Ok(Json(RunDetailResponse {
        run_id: run.run_id,
        user_id: run.user_id,
        recorded_at: run.recorded_at,
        duration_sec: run.duration_sec,
        duration_display: format::format_duration(run.duration_sec),
        distance_km: run.distance_km,
        average_pace: run.average_pace,
        pace_display: format::format_pace(run.average_pace),
        total_steps: run.total_steps,
        route_data: run.route_data,
    }))
}

// ─── Run History ─────────────────────────────────────────────

#[derive(Deserialize)]
struct HistoryQuery {
    /// Cap on returned runs; the whole history when absent
    limit: Option<usize>,
}

/// One run in a history listing. Route data is omitted; fetch the run
/// itself for the full record.
#[derive(Serialize)]
pub struct RunSummary {
    pub run_id: u64,
    pub recorded_at: String,
    pub duration_sec: u64,
    pub distance_km: f64,
    pub average_pace: f64,
    pub total_steps: u64,
}

impl From<Run> for RunSummary {
    fn from(run: Run) -> Self {
        Self {
            run_id: run.run_id,
            recorded_at: run.recorded_at,
            duration_sec: run.duration_sec,
            distance_km: run.distance_km,
            average_pace: run.average_pace,
            total_steps: run.total_steps,
        }
    }
}

/// Get a user's run history, newest first.
async fn get_user_runs(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<u64>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<RunSummary>>> {
    tracing::debug!(user_id, limit = ?params.limit, "Fetching run history");

    let runs = state.db.get_user_runs(user_id, params.limit)?;
    Ok(Json(runs.into_iter().map(RunSummary::from).collect()))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Deserialize)]
struct LeaderboardQuery {
    #[serde(default = "default_leaderboard_limit")]
    limit: usize,
}

fn default_leaderboard_limit() -> usize {
    DEFAULT_LEADERBOARD_LIMIT
}

/// One leaderboard row.
#[derive(Serialize)]
pub struct LeaderboardRow {
    pub user_id: u64,
    pub run_id: u64,
    pub username: String,
    pub distance_km: f64,
    pub average_pace: f64,
    pub pace_display: String,
    pub recorded_at: String,
}

impl From<LeaderboardEntry> for LeaderboardRow {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            user_id: entry.user_id,
            run_id: entry.run_id,
            username: entry.username,
            distance_km: entry.distance_km,
            average_pace: entry.average_pace,
            pace_display: format::format_pace(entry.average_pace),
            recorded_at: entry.recorded_at,
        }
    }
}

/// Get the global distance leaderboard, longest run first.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardRow>>> {
    let limit = params.limit.min(MAX_LEADERBOARD_LIMIT);
    let entries = state.db.get_leaderboard(limit)?;
    Ok(Json(entries.into_iter().map(LeaderboardRow::from).collect()))
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Deserialize)]
struct DashboardQuery {
    /// Whose dashboard to assemble
    user_id: u64,
}

/// Everything the dashboard page shows for one user, in a single call.
#[derive(Serialize)]
pub struct DashboardResponse {
    pub user_id: u64,
    pub username: String,
    pub runs: Vec<RunSummary>,
    pub leaderboard: Vec<LeaderboardRow>,
}

/// Get a user's dashboard: profile, full history and the leaderboard.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>> {
    let user = state
        .db
        .get_user(params.user_id)?
        .ok_or(AppError::UnknownUser(params.user_id))?;

    let runs = state.db.get_user_runs(user.user_id, None)?;
    let leaderboard = state.db.get_leaderboard(DEFAULT_LEADERBOARD_LIMIT)?;

    Ok(Json(DashboardResponse {
        user_id: user.user_id,
        username: user.username,
        runs: runs.into_iter().map(RunSummary::from).collect(),
        leaderboard: leaderboard.into_iter().map(LeaderboardRow::from).collect(),
    }))
}
