//! Use-case services over the repositories.
//!
//! # Responsibility
//! - Apply input rules (blank labels are silent no-ops).
//! - Pair every successful mutation with exactly one history entry.
//! - Keep front ends decoupled from SQL and row shapes.

pub mod bin_service;
pub mod history_logger;
pub mod notes_debounce;
pub mod page_service;
pub mod task_service;

use crate::model::page::PageId;
use crate::model::task::TaskId;
use crate::repo::{EntityRef, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by page/task services.
#[derive(Debug)]
pub enum ServiceError {
    /// Target page does not exist.
    PageNotFound(PageId),
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PageNotFound(id) => write!(f, "page not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(EntityRef::Page(id)) => Self::PageNotFound(id),
            RepoError::NotFound(EntityRef::Task(id)) => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}
