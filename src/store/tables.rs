//! Row types for the six weight tables and a keyed table collection.
//!
//! Each table is a flat list of serde rows with one unique key column.
//! `Table` keeps insertion order (rows are never deleted) and performs all
//! mutation through keyed lookups rather than positional indices.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Accumulated engagement with a sender, stored in log-domain.
///
/// A weight of `ln(n)` corresponds to `n` observed messages; see
/// [`crate::scoring::sender`] for the update recurrence. The same row shape
/// backs both the sender table and the thread-scoped sender table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderWeight {
    pub sender: String,
    pub weight: f64,
}

/// Recurrence pattern of one conversation thread (keyed by subject text).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub thread: String,
    pub weight: f64,
    pub freq: u64,
    /// Seconds between the first occurrence and the most recent one that
    /// updated the velocity weight
    pub time_span: f64,
    pub first_seen: DateTime<Utc>,
}

/// Weight of one term from the thread-subject vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadTermWeight {
    pub term: String,
    pub weight: f64,
}

/// Weight and accumulated frequency of one term from message bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsgTermWeight {
    pub term: String,
    pub weight: f64,
    pub freq: f64,
}

/// One scored email in the rank history. Append-only; written once to the
/// recipient's ledger and once to the global ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankEntry {
    pub date: DateTime<Utc>,
    pub sender: String,
    pub subject: String,
    pub rank: f64,
    pub priority: String,
    pub intent: String,
}

/// Rows addressable by their table's unique key column.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for SenderWeight {
    fn key(&self) -> &str {
        &self.sender
    }
}

impl Keyed for ThreadRecord {
    fn key(&self) -> &str {
        &self.thread
    }
}

impl Keyed for ThreadTermWeight {
    fn key(&self) -> &str {
        &self.term
    }
}

impl Keyed for MsgTermWeight {
    fn key(&self) -> &str {
        &self.term
    }
}

/// An insertion-ordered table of rows.
///
/// Tables are small (one user's history), so keyed lookups scan the rows;
/// there is no positional mutation anywhere in the engine.
#[derive(Debug, Clone)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R> Table<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<R>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row. For keyed tables the caller checks key absence first.
    pub fn push(&mut self, row: R) {
        self.rows.push(row);
    }
}

impl<R: Keyed> Table<R> {
    pub fn get(&self, key: &str) -> Option<&R> {
        self.rows.iter().find(|r| r.key() == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut R> {
        self.rows.iter_mut().find(|r| r.key() == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}
