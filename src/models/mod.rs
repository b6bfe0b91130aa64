// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod leaderboard;
pub mod run;
pub mod user;

pub use leaderboard::LeaderboardEntry;
pub use run::{NewRun, Run};
pub use user::User;
