//! Core domain logic for HyperNotes.
//! This crate is the single source of truth for page/task/history invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::history::{HistoryAction, HistoryEntry, HistoryId};
pub use model::lifecycle::Lifecycle;
pub use model::page::{Page, PageId};
pub use model::task::{Task, TaskId};
pub use repo::history_repo::{HistoryRepository, SqliteHistoryRepository};
pub use repo::page_repo::{PageRepository, SqlitePageRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{EntityRef, RepoError, RepoResult};
pub use service::bin_service::{load_bin, BinContents};
pub use service::history_logger::HistoryLogger;
pub use service::notes_debounce::{NotesDebouncer, DEFAULT_QUIET_PERIOD};
pub use service::page_service::{PageService, SqlitePageService};
pub use service::task_service::{NotesFlush, SqliteTaskService, TaskService};
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
