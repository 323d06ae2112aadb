//! Page record.
//!
//! # Invariants
//! - `id` is assigned once by the store.
//! - `name` is never blank; blank creates and renames are dropped upstream.

use super::lifecycle::Lifecycle;
use serde::{Deserialize, Serialize};

/// Store-assigned page identifier.
pub type PageId = i64;

/// A user-created topic grouping related tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    /// Display name, stored trimmed.
    pub name: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub lifecycle: Lifecycle,
}

impl Page {
    pub fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    /// Case-insensitive substring match used by the home view search box.
    ///
    /// An empty query matches every page.
    pub fn matches_query(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Trims a user-provided page name or task title.
///
/// Returns `None` for blank input, which callers treat as a silent no-op.
pub fn normalize_label(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_label, Page};
    use crate::model::lifecycle::Lifecycle;

    fn page(name: &str) -> Page {
        Page {
            id: 1,
            name: name.to_string(),
            created_at: 0,
            lifecycle: Lifecycle::Active,
        }
    }

    #[test]
    fn normalize_label_trims_and_rejects_blank() {
        assert_eq!(normalize_label("  Groceries \n").as_deref(), Some("Groceries"));
        assert_eq!(normalize_label(" \t "), None);
        assert_eq!(normalize_label(""), None);
    }

    #[test]
    fn matches_query_is_case_insensitive_substring() {
        let groceries = page("Weekly Groceries");
        assert!(groceries.matches_query("groc"));
        assert!(groceries.matches_query("WEEKLY"));
        assert!(groceries.matches_query(""));
        assert!(!groceries.matches_query("chores"));
    }
}
