//! Write-side history logger.
//!
//! # Responsibility
//! - Stamp and append one audit entry per mutating operation.
//! - Keep audit failures from failing the operation that triggered them.
//!
//! # Invariants
//! - `record` never returns an error; failures are logged and dropped.
//! - Log lines carry the action tag only, never the details text.

use crate::model::history::{HistoryAction, HistoryEntry, HistoryId};
use crate::model::now_epoch_ms;
use crate::repo::history_repo::HistoryRepository;
use crate::repo::RepoResult;
use log::warn;

/// Appends timestamped entries to the history log.
pub struct HistoryLogger<H: HistoryRepository> {
    repo: H,
}

impl<H: HistoryRepository> HistoryLogger<H> {
    pub fn new(repo: H) -> Self {
        Self { repo }
    }

    /// Appends `action` with the current wall-clock time.
    ///
    /// Returns the new entry id, or `None` when the store rejected the write.
    pub fn record(&self, action: HistoryAction, details: &str) -> Option<HistoryId> {
        match self.repo.append_entry(action, details, now_epoch_ms()) {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(
                    "event=history_record module=history status=error action={} error={}",
                    action, err
                );
                None
            }
        }
    }

    /// Newest-first slice of the log for the history view.
    pub fn recent(&self, limit: u32) -> RepoResult<Vec<HistoryEntry>> {
        self.repo.list_recent(limit)
    }

    /// Entry count, optionally for one action.
    pub fn count(&self, action: Option<HistoryAction>) -> RepoResult<u64> {
        self.repo.count_entries(action)
    }
}
