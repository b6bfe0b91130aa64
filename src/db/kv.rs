// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory structured keyspace.
//!
//! Every value lives in a string-keyed slot of one of five shapes:
//! - Text: a plain string (index entries)
//! - Hash: a field/value map (entity records)
//! - List: an ordered sequence, newest element at the front
//! - Ranked: members scored for ordered retrieval
//! - Counter: a monotonic identifier sequence
//!
//! One `RwLock` guards the whole keyspace. Each operation takes the lock
//! once, so single operations are atomic; [`MemoryStore::apply`] runs a
//! whole [`WriteBatch`] under one write guard, so multi-key writes are
//! all-or-nothing with no interleaved reader or writer.
//!
//! Reads are deliberately forgiving: a key of the wrong shape behaves
//! like an absent key. Writes replace whatever shape was there.

use std::collections::{HashMap, VecDeque};

use parking_lot::RwLock;

/// One keyed value in the keyspace.
#[derive(Debug, Clone)]
enum Slot {
    Text(String),
    Hash(HashMap<String, String>),
    List(VecDeque<String>),
    Ranked(HashMap<String, f64>),
    Counter(u64),
}

/// In-memory keyspace shared by all handles to the same store.
pub struct MemoryStore {
    slots: RwLock<HashMap<String, Slot>>,
}

impl MemoryStore {
    /// Create an empty keyspace.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    // ─── Counters ────────────────────────────────────────────────

    /// Increment the counter at `key` and return the new value.
    ///
    /// The first call on a fresh key returns 1. No two callers ever
    /// observe the same value for the same key.
    pub fn incr(&self, key: &str) -> u64 {
        let mut slots = self.slots.write();
        let slot = slots
            .entry(key.to_string())
            .or_insert(Slot::Counter(0));
        match slot {
            Slot::Counter(n) => {
                *n += 1;
                *n
            }
            // A mistyped slot restarts the sequence; the key schema keeps
            // counters on dedicated keys so this only happens if a caller
            // reuses a counter key for something else.
            other => {
                *other = Slot::Counter(1);
                1
            }
        }
    }

    // ─── Text index entries ──────────────────────────────────────

    /// Read the text value at `key`, if present.
    pub fn lookup(&self, key: &str) -> Option<String> {
        match self.slots.read().get(key) {
            Some(Slot::Text(value)) => Some(value.clone()),
            _ => None,
        }
    }

    // ─── Entity records ──────────────────────────────────────────

    /// Store a full field set at `key`, replacing any prior value.
    pub fn put_fields(&self, key: &str, fields: HashMap<String, String>) {
        self.slots
            .write()
            .insert(key.to_string(), Slot::Hash(fields));
    }

    /// Read the full field set at `key`. `None` when the record is absent.
    pub fn fields(&self, key: &str) -> Option<HashMap<String, String>> {
        match self.slots.read().get(key) {
            Some(Slot::Hash(fields)) => Some(fields.clone()),
            _ => None,
        }
    }

    /// Read a subset of a record's fields.
    ///
    /// `None` when the record itself is absent. Otherwise the result has
    /// one element per requested name, `None` for unset fields, so the
    /// caller can tell a missing record from a missing field.
    pub fn fields_select(&self, key: &str, names: &[&str]) -> Option<Vec<Option<String>>> {
        match self.slots.read().get(key) {
            Some(Slot::Hash(fields)) => {
                Some(names.iter().map(|name| fields.get(*name).cloned()).collect())
            }
            _ => None,
        }
    }

    // ─── Lists ───────────────────────────────────────────────────

    /// Prepend `value` to the list at `key`, creating the list if needed.
    pub fn push_front(&self, key: &str, value: &str) {
        let mut slots = self.slots.write();
        push_front_slot(&mut slots, key.to_string(), value.to_string());
    }

    /// Read list elements front-to-back, at most `limit` when given.
    ///
    /// An absent key reads as an empty list.
    pub fn list_range(&self, key: &str, limit: Option<usize>) -> Vec<String> {
        match self.slots.read().get(key) {
            Some(Slot::List(items)) => {
                let take = limit.unwrap_or(items.len());
                items.iter().take(take).cloned().collect()
            }
            _ => Vec::new(),
        }
    }

    // ─── Ranked sets ─────────────────────────────────────────────

    /// Set `member`'s score in the ranked set at `key`.
    ///
    /// The score is absolute, not cumulative: writing the same member
    /// twice keeps only the latest score.
    pub fn ranked_set(&self, key: &str, member: &str, score: f64) {
        let mut slots = self.slots.write();
        ranked_set_slot(&mut slots, key.to_string(), member.to_string(), score);
    }

    /// The top `k` members by score, highest first.
    ///
    /// Ties break by member string ascending so retrieval order is
    /// deterministic.
    pub fn ranked_top(&self, key: &str, k: usize) -> Vec<(String, f64)> {
        let slots = self.slots.read();
        let members = match slots.get(key) {
            Some(Slot::Ranked(members)) => members,
            _ => return Vec::new(),
        };

        let mut entries: Vec<(String, f64)> = members
            .iter()
            .map(|(member, score)| (member.clone(), *score))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(k);
        entries
    }

    // ─── Existence and deletion ──────────────────────────────────

    /// Whether any slot exists at `key`, regardless of shape.
    pub fn exists(&self, key: &str) -> bool {
        self.slots.read().contains_key(key)
    }

    /// Remove the slot at `key`. Returns whether anything was removed.
    pub fn remove(&self, key: &str) -> bool {
        self.slots.write().remove(key).is_some()
    }

    // ─── Batched writes ──────────────────────────────────────────

    /// Apply every operation in `batch` under a single write guard.
    ///
    /// All reservations are checked before anything is written: if any
    /// reserved key already exists, the whole batch is rejected and the
    /// keyspace is left untouched.
    pub fn apply(&self, batch: WriteBatch) -> Result<(), ReserveConflict> {
        let mut slots = self.slots.write();

        for op in &batch.ops {
            if let WriteOp::Reserve { key, .. } = op {
                if slots.contains_key(key) {
                    return Err(ReserveConflict { key: key.clone() });
                }
            }
        }

        for op in batch.ops {
            match op {
                WriteOp::Reserve { key, owner } => {
                    slots.insert(key, Slot::Text(owner));
                }
                WriteOp::PutFields { key, fields } => {
                    slots.insert(key, Slot::Hash(fields));
                }
                WriteOp::PushFront { key, value } => {
                    push_front_slot(&mut slots, key, value);
                }
                WriteOp::RankedSet { key, member, score } => {
                    ranked_set_slot(&mut slots, key, member, score);
                }
            }
        }

        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn push_front_slot(slots: &mut HashMap<String, Slot>, key: String, value: String) {
    let slot = slots.entry(key).or_insert_with(|| Slot::List(VecDeque::new()));
    match slot {
        Slot::List(items) => items.push_front(value),
        other => *other = Slot::List(VecDeque::from([value])),
    }
}

fn ranked_set_slot(slots: &mut HashMap<String, Slot>, key: String, member: String, score: f64) {
    let slot = slots
        .entry(key)
        .or_insert_with(|| Slot::Ranked(HashMap::new()));
    match slot {
        Slot::Ranked(members) => {
            members.insert(member, score);
        }
        other => *other = Slot::Ranked(HashMap::from([(member, score)])),
    }
}

/// A multi-operation write applied atomically by [`MemoryStore::apply`].
#[derive(Debug, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

#[derive(Debug)]
enum WriteOp {
    Reserve {
        key: String,
        owner: String,
    },
    PutFields {
        key: String,
        fields: HashMap<String, String>,
    },
    PushFront {
        key: String,
        value: String,
    },
    RankedSet {
        key: String,
        member: String,
        score: f64,
    },
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key` for `owner`, failing the whole batch if it is taken.
    pub fn reserve(mut self, key: impl Into<String>, owner: impl Into<String>) -> Self {
        self.ops.push(WriteOp::Reserve {
            key: key.into(),
            owner: owner.into(),
        });
        self
    }

    /// Store a full field set at `key`.
    pub fn put_fields(mut self, key: impl Into<String>, fields: HashMap<String, String>) -> Self {
        self.ops.push(WriteOp::PutFields {
            key: key.into(),
            fields,
        });
        self
    }

    /// Prepend `value` to the list at `key`.
    pub fn push_front(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ops.push(WriteOp::PushFront {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Set `member`'s score in the ranked set at `key`.
    pub fn ranked_set(
        mut self,
        key: impl Into<String>,
        member: impl Into<String>,
        score: f64,
    ) -> Self {
        self.ops.push(WriteOp::RankedSet {
            key: key.into(),
            member: member.into(),
            score,
        });
        self
    }
}

/// A batch was rejected because a reserved key already existed.
///
/// Nothing from the batch was applied.
#[derive(Debug, thiserror::Error)]
#[error("Key already reserved: {key}")]
pub struct ReserveConflict {
    pub key: String,
}
