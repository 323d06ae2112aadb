//! Task record.
//!
//! # Invariants
//! - `page_id` is fixed at creation.
//! - `completed_at` is set only while `completed` is true.

use super::lifecycle::Lifecycle;
use super::page::PageId;
use serde::{Deserialize, Serialize};

/// Store-assigned task identifier.
pub type TaskId = i64;

/// An actionable item belonging to exactly one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Owning page. Not enforced by a constraint.
    pub page_id: PageId,
    pub title: String,
    /// Free-text notes, empty when never edited.
    pub notes: String,
    pub completed: bool,
    /// Unix epoch milliseconds of the last transition to complete.
    pub completed_at: Option<i64>,
    pub created_at: i64,
    pub lifecycle: Lifecycle,
}

impl Task {
    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }
}
