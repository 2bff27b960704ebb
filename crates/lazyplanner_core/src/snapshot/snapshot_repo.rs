//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and reload the full planner record set as one payload
//!   under a fixed slot key.
//! - Keep SQL and JSON encoding details inside the persistence
//!   boundary.
//!
//! # Invariants
//! - Saving replaces the slot atomically; partial record sets are never
//!   visible to readers.
//! - Loading an absent slot yields an empty record set, not an error.

use crate::db::DbError;
use crate::model::entry::Entry;
use crate::snapshot::record::{EntryRecord, RecordConversionError};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key the planner record set is stored under.
const SNAPSHOT_SLOT: &str = "planner.entries";

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Error raised by snapshot persistence and reload operations.
#[derive(Debug)]
pub enum SnapshotError {
    Db(DbError),
    Encoding(serde_json::Error),
    InvalidData(RecordConversionError),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encoding(err) => write!(f, "snapshot payload encoding failed: {err}"),
            Self::InvalidData(err) => write!(f, "invalid persisted entry data: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encoding(err) => Some(err),
            Self::InvalidData(err) => Some(err),
        }
    }
}

impl From<DbError> for SnapshotError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SnapshotError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value)
    }
}

impl From<RecordConversionError> for SnapshotError {
    fn from(value: RecordConversionError) -> Self {
        Self::InvalidData(value)
    }
}

/// Persistence collaborator contract: the full record set is written
/// after every mutation and reloaded verbatim at startup.
pub trait SnapshotRepository {
    fn save(&self, entries: &[Entry]) -> SnapshotResult<()>;
    fn load(&self) -> SnapshotResult<Vec<Entry>>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn save(&self, entries: &[Entry]) -> SnapshotResult<()> {
        let records: Vec<EntryRecord> = entries.iter().map(EntryRecord::from).collect();
        let payload = serde_json::to_string(&records)?;

        self.conn.execute(
            "INSERT INTO snapshots (slot, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(slot) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![SNAPSHOT_SLOT, payload],
        )?;

        info!(
            "event=snapshot_saved module=snapshot status=ok entries={}",
            entries.len()
        );
        Ok(())
    }

    fn load(&self) -> SnapshotResult<Vec<Entry>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM snapshots WHERE slot = ?1;",
                params![SNAPSHOT_SLOT],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            info!("event=snapshot_loaded module=snapshot status=ok entries=0 slot=empty");
            return Ok(Vec::new());
        };

        let records: Vec<EntryRecord> = serde_json::from_str(&payload)?;
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            entries.push(record.into_entry()?);
        }

        info!(
            "event=snapshot_loaded module=snapshot status=ok entries={}",
            entries.len()
        );
        Ok(entries)
    }
}
