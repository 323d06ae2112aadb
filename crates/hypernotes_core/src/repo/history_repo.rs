//! History log repository.
//!
//! # Invariants
//! - The contract exposes no update or delete path.
//! - Recent listings are newest first (`id DESC`).

use super::{ensure_table, RepoError, RepoResult};
use crate::model::history::{HistoryAction, HistoryEntry, HistoryId};
use rusqlite::{params, Connection};

/// Append-only data access for the `history` collection.
pub trait HistoryRepository {
    fn append_entry(
        &self,
        action: HistoryAction,
        details: &str,
        timestamp: i64,
    ) -> RepoResult<HistoryId>;
    /// Returns up to `limit` entries, newest first.
    fn list_recent(&self, limit: u32) -> RepoResult<Vec<HistoryEntry>>;
    /// Counts entries, optionally restricted to one action.
    fn count_entries(&self, action: Option<HistoryAction>) -> RepoResult<u64>;
}

/// SQLite-backed history repository.
pub struct SqliteHistoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHistoryRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "history")?;
        Ok(Self { conn })
    }
}

impl HistoryRepository for SqliteHistoryRepository<'_> {
    fn append_entry(
        &self,
        action: HistoryAction,
        details: &str,
        timestamp: i64,
    ) -> RepoResult<HistoryId> {
        self.conn.execute(
            "INSERT INTO history (action, details, timestamp) VALUES (?1, ?2, ?3);",
            params![action.as_str(), details, timestamp],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_recent(&self, limit: u32) -> RepoResult<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, action, details, timestamp
             FROM history
             ORDER BY id DESC
             LIMIT ?1;",
        )?;
        let mut rows = stmt.query([i64::from(limit)])?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            let action_text: String = row.get("action")?;
            let action = HistoryAction::parse(&action_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid action `{action_text}` in history.action"
                ))
            })?;
            entries.push(HistoryEntry {
                id: row.get("id")?,
                action,
                details: row.get("details")?,
                timestamp: row.get("timestamp")?,
            });
        }
        Ok(entries)
    }

    fn count_entries(&self, action: Option<HistoryAction>) -> RepoResult<u64> {
        let count: i64 = match action {
            Some(action) => self.conn.query_row(
                "SELECT COUNT(*) FROM history WHERE action = ?1;",
                [action.as_str()],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM history;", [], |row| row.get(0))?,
        };
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative history count `{count}`")))
    }
}
