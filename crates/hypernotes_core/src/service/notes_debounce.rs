//! Debounced notes editing.
//!
//! Editors call [`NotesDebouncer::edit`] on every keystroke; only the latest
//! text per task is kept, and a draft becomes due once no edit has touched it
//! for the quiet period. Writing due drafts is left to
//! `TaskService::flush_notes`, so the end state always equals the last edit.

use crate::model::task::TaskId;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Default idle time before a draft is written.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct Draft {
    notes: String,
    last_edit: Instant,
}

/// Per-task buffer of unsaved notes.
#[derive(Debug)]
pub struct NotesDebouncer {
    quiet_period: Duration,
    drafts: BTreeMap<TaskId, Draft>,
}

impl Default for NotesDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl NotesDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            drafts: BTreeMap::new(),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Replaces the pending draft for `task_id` and restarts its quiet period.
    pub fn edit(&mut self, task_id: TaskId, notes: impl Into<String>, now: Instant) {
        self.drafts.insert(
            task_id,
            Draft {
                notes: notes.into(),
                last_edit: now,
            },
        );
    }

    /// Removes and returns drafts idle for at least the quiet period, by task id.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TaskId, String)> {
        let due: Vec<TaskId> = self
            .drafts
            .iter()
            .filter(|(_, draft)| now.saturating_duration_since(draft.last_edit) >= self.quiet_period)
            .map(|(task_id, _)| *task_id)
            .collect();

        due.into_iter()
            .filter_map(|task_id| {
                self.drafts
                    .remove(&task_id)
                    .map(|draft| (task_id, draft.notes))
            })
            .collect()
    }

    /// Removes and returns every draft regardless of age.
    pub fn take_all(&mut self) -> Vec<(TaskId, String)> {
        std::mem::take(&mut self.drafts)
            .into_iter()
            .map(|(task_id, draft)| (task_id, draft.notes))
            .collect()
    }

    /// Unsaved text for `task_id`, if any; editors show this over stored notes.
    pub fn pending(&self, task_id: TaskId) -> Option<&str> {
        self.drafts.get(&task_id).map(|draft| draft.notes.as_str())
    }

    pub fn pending_count(&self) -> usize {
        self.drafts.len()
    }

    /// Earliest instant at which some draft becomes due.
    pub fn next_due(&self) -> Option<Instant> {
        self.drafts
            .values()
            .map(|draft| draft.last_edit + self.quiet_period)
            .min()
    }
}
