//! Domain model for pages, tasks and the history log.
//!
//! # Responsibility
//! - Define the records shared by repositories, services and front ends.
//! - Keep persisted tag encodings (lifecycle, history action) in one place.
//!
//! # Invariants
//! - Identifiers are assigned by the store and never change.
//! - Deletion is a soft [`Lifecycle::Deleted`] tag, never a physical delete.

pub mod history;
pub mod lifecycle;
pub mod page;
pub mod task;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Clock skew before the epoch collapses to `0` rather than failing.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
