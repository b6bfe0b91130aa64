//! Storage layer: in-memory keyspace engine and the tracker handle.

pub mod fields;
pub mod kv;
pub mod tracker;

pub use kv::{MemoryStore, ReserveConflict, WriteBatch};
pub use tracker::TrackerDb;

/// Key schema for the keyspace.
pub mod keys {
    /// Allocator namespace for user identifiers.
    pub const USER_IDS: &str = "user";
    /// Allocator namespace for run identifiers.
    pub const RUN_IDS: &str = "run";
    /// The global distance leaderboard (ranked set).
    pub const LEADERBOARD: &str = "leaderboard:distance";

    /// Counter key backing an allocator namespace.
    pub fn sequence(namespace: &str) -> String {
        format!("seq:{}", namespace)
    }

    /// A user record.
    pub fn user(user_id: u64) -> String {
        format!("user:{}", user_id)
    }

    /// Uniqueness index entry mapping a username to its user id.
    pub fn username(username: &str) -> String {
        format!("username:{}", username)
    }

    /// A user's run history list, newest first.
    pub fn user_runs(user_id: u64) -> String {
        format!("user:{}:runs", user_id)
    }

    /// A run record.
    pub fn run(run_id: u64) -> String {
        format!("run:{}", run_id)
    }
}
