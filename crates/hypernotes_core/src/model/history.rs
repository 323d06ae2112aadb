//! Append-only history entries.
//!
//! # Invariants
//! - `action` is drawn from the closed [`HistoryAction`] vocabulary.
//! - Entries are never updated or removed once written.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned history identifier.
pub type HistoryId = i64;

/// Mutating action recorded in the history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    CreatePage,
    RenamePage,
    DeletePage,
    RestorePage,
    AddTask,
    ToggleTask,
    DeleteTask,
    RestoreTask,
    UpdateNotes,
}

impl HistoryAction {
    pub const ALL: [HistoryAction; 9] = [
        Self::CreatePage,
        Self::RenamePage,
        Self::DeletePage,
        Self::RestorePage,
        Self::AddTask,
        Self::ToggleTask,
        Self::DeleteTask,
        Self::RestoreTask,
        Self::UpdateNotes,
    ];

    /// Tag persisted in `history.action`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatePage => "create_page",
            Self::RenamePage => "rename_page",
            Self::DeletePage => "delete_page",
            Self::RestorePage => "restore_page",
            Self::AddTask => "add_task",
            Self::ToggleTask => "toggle_task",
            Self::DeleteTask => "delete_task",
            Self::RestoreTask => "restore_task",
            Self::UpdateNotes => "update_notes",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == value)
    }
}

impl Display for HistoryAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub action: HistoryAction,
    /// Human-readable narrative; never parsed back.
    pub details: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::HistoryAction;

    #[test]
    fn every_action_round_trips_through_its_tag() {
        for action in HistoryAction::ALL {
            assert_eq!(HistoryAction::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(HistoryAction::parse("purge_page"), None);
    }

    #[test]
    fn serde_tag_matches_persisted_tag() {
        let json = serde_json::to_string(&HistoryAction::UpdateNotes).unwrap();
        assert_eq!(json, "\"update_notes\"");
    }
}
