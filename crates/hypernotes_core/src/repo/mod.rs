//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define per-collection data access contracts (pages, tasks, history).
//! - Keep SQL details out of the service layer.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Repositories never write history; services do.

pub mod history_repo;
pub mod page_repo;
pub mod task_repo;

use crate::db::DbError;
use crate::model::lifecycle::Lifecycle;
use crate::model::page::PageId;
use crate::model::task::TaskId;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Identifies the record a repository call was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef {
    Page(PageId),
    Task(TaskId),
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page(id) => write!(f, "page {id}"),
            Self::Task(id) => write!(f, "task {id}"),
        }
    }
}

/// Repository error shared by page, task and history persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(EntityRef),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(entity) => write!(f, "{entity} not found"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

fn ensure_table(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(RepoError::MissingRequiredTable(table))
    }
}

fn parse_lifecycle(value: i64, column: &str) -> RepoResult<Lifecycle> {
    Lifecycle::from_db(value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid is_deleted value `{value}` in {column}"))
    })
}
