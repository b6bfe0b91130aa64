//! Leaderboard entries and ranked-member encoding.
//!
//! The ranked set stores one member per run, encoded as
//! `"{user_id}:{run_id}"` with the run's distance as its score. Display
//! rows are reconstructed from the member plus the user and run records
//! at read time, so the ranking survives either record going away.

/// One reconstructed leaderboard row.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub user_id: u64,
    pub run_id: u64,
    /// Username, or a placeholder when the user record is gone
    pub username: String,
    /// Ranking score: the run's distance in kilometers
    pub distance_km: f64,
    pub average_pace: f64,
    pub recorded_at: String,
}

/// Encode the ranked-set member for one of a user's runs.
pub fn member(user_id: u64, run_id: u64) -> String {
    format!("{}:{}", user_id, run_id)
}

/// Decode a ranked-set member back into `(user_id, run_id)`.
///
/// Malformed members decode to `None` and get skipped at read time.
pub fn parse_member(member: &str) -> Option<(u64, u64)> {
    let (user, run) = member.split_once(':')?;
    Some((user.parse().ok()?, run.parse().ok()?))
}

/// Display name for a user whose record cannot be resolved.
pub fn placeholder_name(user_id: u64) -> String {
    format!("Runner {}", user_id)
}
