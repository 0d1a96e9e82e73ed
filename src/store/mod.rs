//! Weight store - durable per-user weight tables
//!
//! Each user owns a directory of six CSV tables under the model directory:
//! sender weights, thread-sender weights, thread weights, thread-term
//! weights, message-term weights, and the rank ledger. The distinguished
//! [`GLOBAL_USER`] scope holds the shared cross-user rank ledger.
//!
//! Saving a table fully replaces its file (write to a temp file, then
//! rename), so a crash never leaves a half-written table behind.

pub mod tables;

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::StoreError;

pub use tables::{
    Keyed, MsgTermWeight, RankEntry, SenderWeight, Table, ThreadRecord, ThreadTermWeight,
};

/// User identifier for the shared cross-user scope.
pub const GLOBAL_USER: &str = "global";

/// File name and column layout of one table. Column order must match the
/// serde field order of the table's row struct.
struct Schema {
    file: &'static str,
    headers: &'static [&'static str],
}

const SENDER_WEIGHTS: Schema = Schema {
    file: "sender_weights.csv",
    headers: &["sender", "weight"],
};

const THREAD_SENDER_WEIGHTS: Schema = Schema {
    file: "thread_sender_weights.csv",
    headers: &["sender", "weight"],
};

const THREAD_WEIGHTS: Schema = Schema {
    file: "thread_weights.csv",
    headers: &["thread", "weight", "freq", "time_span", "first_seen"],
};

const THREAD_TERM_WEIGHTS: Schema = Schema {
    file: "thread_term_weights.csv",
    headers: &["term", "weight"],
};

const MSG_TERM_WEIGHTS: Schema = Schema {
    file: "msg_term_weights.csv",
    headers: &["term", "weight", "freq"],
};

const RANK_LOG: Schema = Schema {
    file: "rank_log.csv",
    headers: &["date", "sender", "subject", "rank", "priority", "intent"],
};

const ALL_SCHEMAS: [&Schema; 6] = [
    &SENDER_WEIGHTS,
    &THREAD_SENDER_WEIGHTS,
    &THREAD_WEIGHTS,
    &THREAD_TERM_WEIGHTS,
    &MSG_TERM_WEIGHTS,
    &RANK_LOG,
];

/// One user's full table set, loaded together at the start of a train call.
#[derive(Debug, Clone, Default)]
pub struct UserTables {
    pub senders: Table<SenderWeight>,
    pub thread_senders: Table<SenderWeight>,
    pub threads: Table<ThreadRecord>,
    pub thread_terms: Table<ThreadTermWeight>,
    pub msg_terms: Table<MsgTermWeight>,
    pub rank_log: Table<RankEntry>,
}

/// Loads and persists per-user weight tables under a model directory.
pub struct WeightStore {
    model_dir: PathBuf,
}

impl WeightStore {
    /// Create a store rooted at `model_dir`. No filesystem access happens
    /// until a table is loaded or saved.
    pub fn open(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
        }
    }

    /// The model directory this store is rooted at.
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    fn user_dir(&self, user: &str) -> PathBuf {
        self.model_dir.join(user)
    }

    /// Whether the user has a bootstrapped table set.
    pub fn exists(&self, user: &str) -> bool {
        self.user_dir(user).is_dir()
    }

    /// Load all six tables for `user`. Fails with [`StoreError::NotFound`]
    /// if the user was never bootstrapped.
    pub fn load(&self, user: &str) -> Result<UserTables, StoreError> {
        if !self.exists(user) {
            return Err(StoreError::NotFound(user.to_string()));
        }
        debug!("loading weight tables for user '{}'", user);
        Ok(UserTables {
            senders: self.read_table(user, &SENDER_WEIGHTS)?,
            thread_senders: self.read_table(user, &THREAD_SENDER_WEIGHTS)?,
            threads: self.read_table(user, &THREAD_WEIGHTS)?,
            thread_terms: self.read_table(user, &THREAD_TERM_WEIGHTS)?,
            msg_terms: self.read_table(user, &MSG_TERM_WEIGHTS)?,
            rank_log: self.read_table(user, &RANK_LOG)?,
        })
    }

    /// Load only the rank ledger for `user`. The trainer uses this to fetch
    /// the global ledger fresh, independent of the per-user load.
    pub fn load_rank_log(&self, user: &str) -> Result<Table<RankEntry>, StoreError> {
        if !self.exists(user) {
            return Err(StoreError::NotFound(user.to_string()));
        }
        self.read_table(user, &RANK_LOG)
    }

    pub fn save_sender_weights(
        &self,
        user: &str,
        table: &Table<SenderWeight>,
    ) -> Result<(), StoreError> {
        self.write_table(user, &SENDER_WEIGHTS, table)
    }

    pub fn save_thread_sender_weights(
        &self,
        user: &str,
        table: &Table<SenderWeight>,
    ) -> Result<(), StoreError> {
        self.write_table(user, &THREAD_SENDER_WEIGHTS, table)
    }

    pub fn save_thread_weights(
        &self,
        user: &str,
        table: &Table<ThreadRecord>,
    ) -> Result<(), StoreError> {
        self.write_table(user, &THREAD_WEIGHTS, table)
    }

    pub fn save_thread_term_weights(
        &self,
        user: &str,
        table: &Table<ThreadTermWeight>,
    ) -> Result<(), StoreError> {
        self.write_table(user, &THREAD_TERM_WEIGHTS, table)
    }

    pub fn save_msg_term_weights(
        &self,
        user: &str,
        table: &Table<MsgTermWeight>,
    ) -> Result<(), StoreError> {
        self.write_table(user, &MSG_TERM_WEIGHTS, table)
    }

    pub fn save_rank_log(&self, user: &str, table: &Table<RankEntry>) -> Result<(), StoreError> {
        self.write_table(user, &RANK_LOG, table)
    }

    /// Create an empty table set for `user`, skipping files that already
    /// exist. This is the external bootstrap step referenced by
    /// [`StoreError::NotFound`]; the train path never calls it.
    pub fn bootstrap(&self, user: &str) -> Result<(), StoreError> {
        let dir = self.user_dir(user);
        fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
        for schema in ALL_SCHEMAS {
            let path = dir.join(schema.file);
            if path.exists() {
                continue;
            }
            let mut header_line = schema.headers.join(",");
            header_line.push('\n');
            fs::write(&path, header_line).map_err(|e| io_err(&path, e))?;
        }
        info!("bootstrapped empty weight tables for user '{}'", user);
        Ok(())
    }

    fn read_table<R: DeserializeOwned>(
        &self,
        user: &str,
        schema: &Schema,
    ) -> Result<Table<R>, StoreError> {
        let path = self.user_dir(user).join(schema.file);
        if !path.exists() {
            return Err(StoreError::NotFound(user.to_string()));
        }
        let mut reader = csv::Reader::from_path(&path).map_err(|e| csv_err(&path, e))?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row.map_err(|e| csv_err(&path, e))?);
        }
        Ok(Table::from_rows(rows))
    }

    fn write_table<R: Serialize>(
        &self,
        user: &str,
        schema: &Schema,
        table: &Table<R>,
    ) -> Result<(), StoreError> {
        let path = self.user_dir(user).join(schema.file);
        let tmp = path.with_extension("csv.tmp");

        // Headers are written explicitly so empty tables still carry the
        // column layout on disk.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)
            .map_err(|e| csv_err(&tmp, e))?;
        writer
            .write_record(schema.headers)
            .map_err(|e| csv_err(&tmp, e))?;
        for row in table.rows() {
            writer.serialize(row).map_err(|e| csv_err(&tmp, e))?;
        }
        writer.flush().map_err(|e| io_err(&tmp, e))?;
        drop(writer);

        fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
        Ok(())
    }
}

fn io_err(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn csv_err(path: &Path, source: csv::Error) -> StoreError {
    StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    }
}
