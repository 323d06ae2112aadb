//! Page repository contract and SQLite implementation.
//!
//! # Invariants
//! - Page listings are ordered newest insert first (`id DESC`).
//! - Lookups by id ignore the lifecycle; listings filter on it.

use super::{ensure_table, parse_lifecycle, EntityRef, RepoError, RepoResult};
use crate::model::lifecycle::Lifecycle;
use crate::model::page::{Page, PageId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PAGE_SELECT_SQL: &str = "SELECT id, name, created_at, is_deleted FROM pages";

/// Data access for the `pages` collection.
pub trait PageRepository {
    /// Inserts an active page and returns it with its assigned id.
    fn insert_page(&self, name: &str, created_at: i64) -> RepoResult<Page>;
    /// Loads one page regardless of lifecycle.
    fn get_page(&self, id: PageId) -> RepoResult<Option<Page>>;
    /// Lists pages in the given lifecycle, newest first.
    fn list_pages(&self, lifecycle: Lifecycle) -> RepoResult<Vec<Page>>;
    /// Overwrites the page name.
    fn rename_page(&self, id: PageId, name: &str) -> RepoResult<()>;
    /// Sets the soft-delete tag.
    fn set_page_lifecycle(&self, id: PageId, lifecycle: Lifecycle) -> RepoResult<()>;
}

/// SQLite-backed page repository.
pub struct SqlitePageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePageRepository<'conn> {
    /// Wraps a migrated connection, checking the `pages` table is present.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "pages")?;
        Ok(Self { conn })
    }
}

impl PageRepository for SqlitePageRepository<'_> {
    fn insert_page(&self, name: &str, created_at: i64) -> RepoResult<Page> {
        self.conn.execute(
            "INSERT INTO pages (name, created_at, is_deleted) VALUES (?1, ?2, ?3);",
            params![name, created_at, Lifecycle::Active.to_db()],
        )?;

        Ok(Page {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            created_at,
            lifecycle: Lifecycle::Active,
        })
    }

    fn get_page(&self, id: PageId) -> RepoResult<Option<Page>> {
        let row = self
            .conn
            .query_row(
                &format!("{PAGE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                read_page_row,
            )
            .optional()?;
        row.map(RawPage::into_page).transpose()
    }

    fn list_pages(&self, lifecycle: Lifecycle) -> RepoResult<Vec<Page>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PAGE_SELECT_SQL} WHERE is_deleted = ?1 ORDER BY id DESC;"
        ))?;
        let rows = stmt.query_map([lifecycle.to_db()], read_page_row)?;

        let mut pages = Vec::new();
        for row in rows {
            pages.push(row?.into_page()?);
        }
        Ok(pages)
    }

    fn rename_page(&self, id: PageId, name: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE pages SET name = ?2 WHERE id = ?1;",
            params![id, name],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(EntityRef::Page(id)));
        }
        Ok(())
    }

    fn set_page_lifecycle(&self, id: PageId, lifecycle: Lifecycle) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE pages SET is_deleted = ?2 WHERE id = ?1;",
            params![id, lifecycle.to_db()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(EntityRef::Page(id)));
        }
        Ok(())
    }
}

/// Row shape before lifecycle validation.
struct RawPage {
    id: PageId,
    name: String,
    created_at: i64,
    is_deleted: i64,
}

impl RawPage {
    fn into_page(self) -> RepoResult<Page> {
        Ok(Page {
            id: self.id,
            name: self.name,
            created_at: self.created_at,
            lifecycle: parse_lifecycle(self.is_deleted, "pages.is_deleted")?,
        })
    }
}

fn read_page_row(row: &Row<'_>) -> rusqlite::Result<RawPage> {
    Ok(RawPage {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
        is_deleted: row.get("is_deleted")?,
    })
}
