//! Task use-case service.
//!
//! # Invariants
//! - Blank titles never reach the store and never produce history.
//! - Every successful mutation appends exactly one history entry.
//! - Notes history never includes the note body.

use super::history_logger::HistoryLogger;
use super::notes_debounce::NotesDebouncer;
use super::{ServiceError, ServiceResult};
use crate::model::history::HistoryAction;
use crate::model::lifecycle::Lifecycle;
use crate::model::now_epoch_ms;
use crate::model::page::{normalize_label, PageId};
use crate::model::task::{Task, TaskId};
use crate::repo::history_repo::{HistoryRepository, SqliteHistoryRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use crate::repo::RepoResult;
use log::{debug, info, warn};
use rusqlite::Connection;
use std::time::Instant;

/// Result of persisting buffered note drafts.
#[derive(Debug, Default)]
pub struct NotesFlush {
    /// Tasks whose notes were written.
    pub persisted: Vec<TaskId>,
    /// Drafts that failed to write. They are not retried.
    pub failed: Vec<(TaskId, ServiceError)>,
}

/// Task operations with history logging.
pub struct TaskService<T: TaskRepository, H: HistoryRepository> {
    tasks: T,
    history: HistoryLogger<H>,
}

/// Service wired to the SQLite repositories of one connection.
pub type SqliteTaskService<'conn> =
    TaskService<SqliteTaskRepository<'conn>, SqliteHistoryRepository<'conn>>;

impl<'conn> SqliteTaskService<'conn> {
    /// Builds a service over SQLite repositories sharing one connection.
    pub fn try_from_conn(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteTaskRepository::try_new(conn)?,
            SqliteHistoryRepository::try_new(conn)?,
        ))
    }
}

impl<T: TaskRepository, H: HistoryRepository> TaskService<T, H> {
    pub fn new(tasks: T, history: H) -> Self {
        Self {
            tasks,
            history: HistoryLogger::new(history),
        }
    }

    pub fn history(&self) -> &HistoryLogger<H> {
        &self.history
    }

    /// Adds a task under `page_id`, or does nothing when `title` is blank.
    ///
    /// The owning page is not checked; callers pass ids from a loaded page.
    pub fn create_task(&self, page_id: PageId, title: &str) -> ServiceResult<Option<Task>> {
        let Some(title) = normalize_label(title) else {
            debug!("event=task_create module=task_service status=noop reason=blank_title");
            return Ok(None);
        };

        let task = self.tasks.insert_task(page_id, &title, now_epoch_ms())?;
        self.history
            .record(HistoryAction::AddTask, &format!("Added task: {}", task.title));
        info!(
            "event=task_create module=task_service status=ok task_id={} page_id={}",
            task.id, page_id
        );
        Ok(Some(task))
    }

    /// Active tasks of one page in insertion order.
    pub fn list_tasks(&self, page_id: PageId) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_tasks_for_page(page_id)?)
    }

    /// Soft-deleted tasks across all pages, newest first.
    pub fn list_deleted_tasks(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_tasks(Lifecycle::Deleted)?)
    }

    pub fn get_task(&self, id: TaskId) -> ServiceResult<Option<Task>> {
        Ok(self.tasks.get_task(id)?)
    }

    /// Flips completion and returns the updated task.
    pub fn toggle_completion(&self, id: TaskId) -> ServiceResult<Task> {
        let task = self.tasks.toggle_task(id, now_epoch_ms())?;
        let verb = if task.completed {
            "Completed"
        } else {
            "Uncompleted"
        };
        self.history.record(
            HistoryAction::ToggleTask,
            &format!("{verb} task: {}", task.title),
        );
        info!(
            "event=task_toggle module=task_service status=ok task_id={id} completed={}",
            task.completed
        );
        Ok(task)
    }

    /// Overwrites notes verbatim; the last write wins.
    pub fn update_notes(&self, id: TaskId, notes: &str) -> ServiceResult<()> {
        self.tasks.update_task_notes(id, notes)?;
        self.history
            .record(HistoryAction::UpdateNotes, "Updated notes for task");
        info!(
            "event=task_notes module=task_service status=ok task_id={id} notes_len={}",
            notes.len()
        );
        Ok(())
    }

    /// Writes drafts that have been idle for the debouncer's quiet period.
    pub fn flush_notes(&self, debouncer: &mut NotesDebouncer, now: Instant) -> NotesFlush {
        self.persist_drafts(debouncer.take_due(now))
    }

    /// Writes every buffered draft, idle or not. Use on shutdown.
    pub fn flush_all_notes(&self, debouncer: &mut NotesDebouncer) -> NotesFlush {
        self.persist_drafts(debouncer.take_all())
    }

    /// Moves a task to the bin.
    pub fn delete_task(&self, id: TaskId) -> ServiceResult<()> {
        let task = self.require_task(id)?;
        self.tasks.set_task_lifecycle(id, Lifecycle::Deleted)?;
        self.history.record(
            HistoryAction::DeleteTask,
            &format!("Deleted task: {}", task.title),
        );
        info!("event=task_delete module=task_service status=ok task_id={id}");
        Ok(())
    }

    /// Brings a task back from the bin.
    pub fn restore_task(&self, id: TaskId) -> ServiceResult<()> {
        let task = self.require_task(id)?;
        self.tasks.set_task_lifecycle(id, Lifecycle::Active)?;
        self.history.record(
            HistoryAction::RestoreTask,
            &format!("Restored task: {}", task.title),
        );
        info!("event=task_restore module=task_service status=ok task_id={id}");
        Ok(())
    }

    fn persist_drafts(&self, drafts: Vec<(TaskId, String)>) -> NotesFlush {
        let mut outcome = NotesFlush::default();
        for (task_id, notes) in drafts {
            match self.update_notes(task_id, &notes) {
                Ok(()) => outcome.persisted.push(task_id),
                Err(err) => {
                    warn!(
                        "event=task_notes module=task_service status=error task_id={task_id} error={err}"
                    );
                    outcome.failed.push((task_id, err));
                }
            }
        }
        outcome
    }

    fn require_task(&self, id: TaskId) -> ServiceResult<Task> {
        self.tasks
            .get_task(id)?
            .ok_or(ServiceError::TaskNotFound(id))
    }
}
