//! Explicit storage handle.
//!
//! # Responsibility
//! - Own the single connection used by repositories for one session.
//! - Make open and close explicit instead of relying on a process-wide instance.
//!
//! # Invariants
//! - A `Store` always wraps a migrated connection.
//! - Repositories borrow the connection; they never outlive the store.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;
use std::path::Path;

/// Session-scoped handle over the embedded database.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens the database file at `path`, creating it on first use.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Borrows the underlying connection for repository construction.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection, surfacing any error SQLite reports on close.
    ///
    /// Dropping a `Store` also closes it, but silently.
    pub fn close(self) -> DbResult<()> {
        match self.conn.close() {
            Ok(()) => {
                info!("event=db_close module=db status=ok");
                Ok(())
            }
            Err((_conn, err)) => {
                warn!("event=db_close module=db status=error error={err}");
                Err(DbError::Sqlite(err))
            }
        }
    }
}
