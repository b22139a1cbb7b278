// This software is provided for non-commercial use only.
// Commercial use is strictly prohibited.
// If you use, modify, or redistribute this software, you must provide proper attribution to the original author.
// (c) 2026 Onur Tuna. All rights reserved.

//! Embedded question store backed by redb.
//!
//! One table holds every question:
//!
//! ```text
//! key   : [u8; 8]  big-endian batch position (0, 1, 2, …)
//! value : JSON-serialized Question
//! ```
//!
//! Keys are positions, not identities: saving a second batch overwrites
//! keys 0..N-1 in place rather than appending after the existing entries.

use std::time::{Duration, Instant};

use byteorder::{BigEndian, ByteOrder};
use redb::{Database, DatabaseError, ReadableTable, ReadableTableMetadata, TableDefinition, TableError};
use tracing::warn;

use crate::config::Config;
use crate::error::{DatacastleError, Result};
use crate::loader::Question;

const RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Encode a batch position as the fixed 8-byte big-endian key format.
fn encode_key(pos: u64) -> [u8; 8] {
    let mut key = [0u8; 8];
    BigEndian::write_u64(&mut key, pos);
    key
}

/// Handle on the on-disk question store. Holds the database open for the
/// lifetime of the value; the file lock is released on drop.
pub struct QuestionStore {
    db: Database,
    table: String,
}

impl QuestionStore {
    /// Open (or create) the database file named in `cfg`.
    ///
    /// redb fails fast when the file is locked by another process, so lock
    /// errors are retried until `cfg.open_timeout` elapses and only then
    /// surfaced to the caller.
    pub fn open(cfg: &Config) -> Result<Self> {
        let deadline = Instant::now() + cfg.open_timeout;
        let db = loop {
            match Database::create(&cfg.db_path) {
                Ok(db) => break db,
                Err(e) if retryable(&e) && Instant::now() < deadline => {
                    warn!(path = ?cfg.db_path, error = %e, "Store busy, retrying");
                    std::thread::sleep(RETRY_INTERVAL);
                }
                Err(e) => {
                    return Err(DatacastleError::Storage(format!(
                        "open {:?}: {e}",
                        cfg.db_path
                    )));
                }
            }
        };
        Ok(QuestionStore {
            db,
            table: cfg.table.clone(),
        })
    }

    fn table_def(&self) -> TableDefinition<'_, &'static [u8], &'static [u8]> {
        TableDefinition::new(&self.table)
    }

    /// Persist `questions` under keys 0..N-1 in one write transaction.
    ///
    /// The batch is all-or-nothing: a serialization or insert failure drops
    /// the uncommitted transaction and nothing reaches disk. Returns the
    /// number of questions written.
    pub fn save_questions(&self, questions: &[Question]) -> Result<usize> {
        let txn = self
            .db
            .begin_write()
            .map_err(|e| DatacastleError::Storage(format!("begin write: {e}")))?;
        let mut written = 0;
        {
            let mut table = txn.open_table(self.table_def()).map_err(|_| {
                DatacastleError::Storage(format!("could not create {} table", self.table))
            })?;
            for (pos, question) in questions.iter().enumerate() {
                let buf = serde_json::to_vec(question)?;
                let key = encode_key(pos as u64);
                table
                    .insert(key.as_slice(), buf.as_slice())
                    .map_err(|e| DatacastleError::Storage(format!("put key {pos}: {e}")))?;
                written += 1;
            }
        }
        txn.commit()
            .map_err(|e| DatacastleError::Storage(format!("commit: {e}")))?;
        Ok(written)
    }

    /// Fetch the raw stored bytes at `key`.
    ///
    /// An absent key is `Ok(None)`, not an error, and so is a store whose
    /// table was never created.
    pub fn question_by_key(&self, key: u64) -> Result<Option<Vec<u8>>> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| DatacastleError::Storage(format!("begin read: {e}")))?;
        let table = match txn.open_table(self.table_def()) {
            Ok(t) => t,
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => {
                return Err(DatacastleError::Storage(format!(
                    "open {} table: {e}",
                    self.table
                )));
            }
        };
        let value = table
            .get(encode_key(key).as_slice())
            .map_err(|e| DatacastleError::Storage(format!("get key {key}: {e}")))?;
        Ok(value.map(|v| v.value().to_vec()))
    }

    /// Number of questions currently stored.
    pub fn count(&self) -> Result<u64> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| DatacastleError::Storage(format!("begin read: {e}")))?;
        match txn.open_table(self.table_def()) {
            Ok(t) => t
                .len()
                .map_err(|e| DatacastleError::Storage(format!("count: {e}"))),
            Err(TableError::TableDoesNotExist(_)) => Ok(0),
            Err(e) => Err(DatacastleError::Storage(format!(
                "open {} table: {e}",
                self.table
            ))),
        }
    }
}

fn retryable(e: &DatabaseError) -> bool {
    // Lock contention shows up as DatabaseAlreadyOpen (same process) or an
    // I/O error from the file lock (other process). Corruption and format
    // errors are not worth retrying.
    matches!(
        e,
        DatabaseError::DatabaseAlreadyOpen | DatabaseError::Storage(redb::StorageError::Io(_))
    )
}
