//! Page use-case service.
//!
//! # Invariants
//! - Blank names never reach the store and never produce history.
//! - Renaming to the current name is a no-op without history.
//! - Deleting a page leaves its tasks untouched.

use super::history_logger::HistoryLogger;
use super::{ServiceError, ServiceResult};
use crate::model::history::HistoryAction;
use crate::model::lifecycle::Lifecycle;
use crate::model::now_epoch_ms;
use crate::model::page::{normalize_label, Page, PageId};
use crate::repo::history_repo::{HistoryRepository, SqliteHistoryRepository};
use crate::repo::page_repo::{PageRepository, SqlitePageRepository};
use crate::repo::RepoResult;
use log::{debug, info};
use rusqlite::Connection;

/// Page operations with history logging.
pub struct PageService<P: PageRepository, H: HistoryRepository> {
    pages: P,
    history: HistoryLogger<H>,
}

/// Service wired to the SQLite repositories of one connection.
pub type SqlitePageService<'conn> =
    PageService<SqlitePageRepository<'conn>, SqliteHistoryRepository<'conn>>;

impl<'conn> SqlitePageService<'conn> {
    /// Builds a service over SQLite repositories sharing one connection.
    pub fn try_from_conn(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqlitePageRepository::try_new(conn)?,
            SqliteHistoryRepository::try_new(conn)?,
        ))
    }
}

impl<P: PageRepository, H: HistoryRepository> PageService<P, H> {
    pub fn new(pages: P, history: H) -> Self {
        Self {
            pages,
            history: HistoryLogger::new(history),
        }
    }

    pub fn history(&self) -> &HistoryLogger<H> {
        &self.history
    }

    /// Creates a page, or does nothing when `name` is blank.
    pub fn create_page(&self, name: &str) -> ServiceResult<Option<Page>> {
        let Some(name) = normalize_label(name) else {
            debug!("event=page_create module=page_service status=noop reason=blank_name");
            return Ok(None);
        };

        let page = self.pages.insert_page(&name, now_epoch_ms())?;
        self.history.record(
            HistoryAction::CreatePage,
            &format!("Created page: {}", page.name),
        );
        info!(
            "event=page_create module=page_service status=ok page_id={}",
            page.id
        );
        Ok(Some(page))
    }

    /// Active pages, most recently created first.
    pub fn list_pages(&self) -> ServiceResult<Vec<Page>> {
        Ok(self.pages.list_pages(Lifecycle::Active)?)
    }

    /// Active pages whose name contains `query`, ignoring case.
    pub fn search_pages(&self, query: &str) -> ServiceResult<Vec<Page>> {
        let query = query.trim();
        let mut pages = self.list_pages()?;
        pages.retain(|page| page.matches_query(query));
        Ok(pages)
    }

    /// Soft-deleted pages, most recently created first.
    pub fn list_deleted_pages(&self) -> ServiceResult<Vec<Page>> {
        Ok(self.pages.list_pages(Lifecycle::Deleted)?)
    }

    /// Loads one page for the detail view, whatever its lifecycle.
    pub fn get_page(&self, id: PageId) -> ServiceResult<Option<Page>> {
        Ok(self.pages.get_page(id)?)
    }

    /// Renames a page.
    ///
    /// Returns `Ok(false)` without touching the store when the trimmed name is
    /// blank or equal to the current one. On error the stored name is unchanged.
    pub fn rename_page(&self, id: PageId, new_name: &str) -> ServiceResult<bool> {
        let current = self.require_page(id)?;
        let new_name = match normalize_label(new_name) {
            Some(name) if name != current.name => name,
            _ => {
                debug!("event=page_rename module=page_service status=noop page_id={id}");
                return Ok(false);
            }
        };

        self.pages.rename_page(id, &new_name)?;
        self.history.record(
            HistoryAction::RenamePage,
            &format!("Renamed page from \"{}\" to \"{}\"", current.name, new_name),
        );
        info!("event=page_rename module=page_service status=ok page_id={id}");
        Ok(true)
    }

    /// Moves a page to the bin. Its tasks keep their own lifecycle.
    pub fn delete_page(&self, id: PageId) -> ServiceResult<()> {
        let page = self.require_page(id)?;
        self.pages.set_page_lifecycle(id, Lifecycle::Deleted)?;
        self.history.record(
            HistoryAction::DeletePage,
            &format!("Deleted page: {}", page.name),
        );
        info!("event=page_delete module=page_service status=ok page_id={id}");
        Ok(())
    }

    /// Brings a page back from the bin.
    pub fn restore_page(&self, id: PageId) -> ServiceResult<()> {
        let page = self.require_page(id)?;
        self.pages.set_page_lifecycle(id, Lifecycle::Active)?;
        self.history.record(
            HistoryAction::RestorePage,
            &format!("Restored page: {}", page.name),
        );
        info!("event=page_restore module=page_service status=ok page_id={id}");
        Ok(())
    }

    fn require_page(&self, id: PageId) -> ServiceResult<Page> {
        self.pages
            .get_page(id)?
            .ok_or(ServiceError::PageNotFound(id))
    }
}
