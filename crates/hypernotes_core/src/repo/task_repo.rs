//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - Per-page listings return active tasks in insertion order (`id ASC`).
//! - Lifecycle listings (bin view) are newest first (`id DESC`).
//! - Completion flips happen in one statement; `completed_at` follows the flag.

use super::{ensure_table, parse_lifecycle, EntityRef, RepoError, RepoResult};
use crate::model::lifecycle::Lifecycle;
use crate::model::page::PageId;
use crate::model::task::{Task, TaskId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    page_id,
    title,
    notes,
    completed,
    completed_at,
    created_at,
    is_deleted
FROM tasks";

/// Data access for the `tasks` collection.
pub trait TaskRepository {
    /// Inserts an active, incomplete task with empty notes.
    fn insert_task(&self, page_id: PageId, title: &str, created_at: i64) -> RepoResult<Task>;
    /// Loads one task regardless of lifecycle.
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Lists active tasks owned by `page_id` in insertion order.
    fn list_tasks_for_page(&self, page_id: PageId) -> RepoResult<Vec<Task>>;
    /// Lists tasks of every page in the given lifecycle, newest first.
    fn list_tasks(&self, lifecycle: Lifecycle) -> RepoResult<Vec<Task>>;
    /// Flips completion, stamping `completed_at = now` on the way to complete.
    fn toggle_task(&self, id: TaskId, now: i64) -> RepoResult<Task>;
    /// Overwrites notes verbatim.
    fn update_task_notes(&self, id: TaskId, notes: &str) -> RepoResult<()>;
    /// Sets the soft-delete tag.
    fn set_task_lifecycle(&self, id: TaskId, lifecycle: Lifecycle) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a migrated connection, checking the `tasks` table is present.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "tasks")?;
        Ok(Self { conn })
    }

    fn collect(&self, sql: &str, param: i64) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([param], read_task_row)?;
        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?.into_task()?);
        }
        Ok(tasks)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn insert_task(&self, page_id: PageId, title: &str, created_at: i64) -> RepoResult<Task> {
        self.conn.execute(
            "INSERT INTO tasks (page_id, title, notes, completed, completed_at, created_at, is_deleted)
             VALUES (?1, ?2, '', 0, NULL, ?3, ?4);",
            params![page_id, title, created_at, Lifecycle::Active.to_db()],
        )?;

        Ok(Task {
            id: self.conn.last_insert_rowid(),
            page_id,
            title: title.to_string(),
            notes: String::new(),
            completed: false,
            completed_at: None,
            created_at,
            lifecycle: Lifecycle::Active,
        })
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let row = self
            .conn
            .query_row(
                &format!("{TASK_SELECT_SQL} WHERE id = ?1;"),
                [id],
                read_task_row,
            )
            .optional()?;
        row.map(RawTask::into_task).transpose()
    }

    fn list_tasks_for_page(&self, page_id: PageId) -> RepoResult<Vec<Task>> {
        self.collect(
            &format!("{TASK_SELECT_SQL} WHERE page_id = ?1 AND is_deleted = 0 ORDER BY id ASC;"),
            page_id,
        )
    }

    fn list_tasks(&self, lifecycle: Lifecycle) -> RepoResult<Vec<Task>> {
        self.collect(
            &format!("{TASK_SELECT_SQL} WHERE is_deleted = ?1 ORDER BY id DESC;"),
            lifecycle.to_db(),
        )
    }

    fn toggle_task(&self, id: TaskId, now: i64) -> RepoResult<Task> {
        // SET expressions read the pre-update row.
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                completed = 1 - completed,
                completed_at = CASE WHEN completed = 0 THEN ?2 ELSE NULL END
             WHERE id = ?1;",
            params![id, now],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(EntityRef::Task(id)));
        }

        self.get_task(id)?
            .ok_or(RepoError::NotFound(EntityRef::Task(id)))
    }

    fn update_task_notes(&self, id: TaskId, notes: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET notes = ?2 WHERE id = ?1;",
            params![id, notes],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(EntityRef::Task(id)));
        }
        Ok(())
    }

    fn set_task_lifecycle(&self, id: TaskId, lifecycle: Lifecycle) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET is_deleted = ?2 WHERE id = ?1;",
            params![id, lifecycle.to_db()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(EntityRef::Task(id)));
        }
        Ok(())
    }
}

struct RawTask {
    id: TaskId,
    page_id: PageId,
    title: String,
    notes: String,
    completed: i64,
    completed_at: Option<i64>,
    created_at: i64,
    is_deleted: i64,
}

impl RawTask {
    fn into_task(self) -> RepoResult<Task> {
        let completed = match self.completed {
            0 => false,
            1 => true,
            other => {
                return Err(RepoError::InvalidData(format!(
                    "invalid completed value `{other}` in tasks.completed"
                )));
            }
        };

        Ok(Task {
            id: self.id,
            page_id: self.page_id,
            title: self.title,
            notes: self.notes,
            completed,
            completed_at: self.completed_at,
            created_at: self.created_at,
            lifecycle: parse_lifecycle(self.is_deleted, "tasks.is_deleted")?,
        })
    }
}

fn read_task_row(row: &Row<'_>) -> rusqlite::Result<RawTask> {
    Ok(RawTask {
        id: row.get("id")?,
        page_id: row.get("page_id")?,
        title: row.get("title")?,
        notes: row.get("notes")?,
        completed: row.get("completed")?,
        completed_at: row.get("completed_at")?,
        created_at: row.get("created_at")?,
        is_deleted: row.get("is_deleted")?,
    })
}
