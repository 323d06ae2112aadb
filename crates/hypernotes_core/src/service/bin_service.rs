//! Bin view: everything soft-deleted, in one read.

use super::page_service::PageService;
use super::task_service::TaskService;
use super::ServiceResult;
use crate::model::page::Page;
use crate::model::task::Task;
use crate::repo::history_repo::HistoryRepository;
use crate::repo::page_repo::PageRepository;
use crate::repo::task_repo::TaskRepository;
use serde::Serialize;

/// Soft-deleted pages and tasks, each newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BinContents {
    pub pages: Vec<Page>,
    pub tasks: Vec<Task>,
}

impl BinContents {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.tasks.is_empty()
    }
}

/// Loads the bin. Restores go through the page/task services.
pub fn load_bin<P, T, HP, HT>(
    pages: &PageService<P, HP>,
    tasks: &TaskService<T, HT>,
) -> ServiceResult<BinContents>
where
    P: PageRepository,
    T: TaskRepository,
    HP: HistoryRepository,
    HT: HistoryRepository,
{
    Ok(BinContents {
        pages: pages.list_deleted_pages()?,
        tasks: tasks.list_deleted_tasks()?,
    })
}
