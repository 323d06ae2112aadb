use hypernotes_core::db::open_db_in_memory;
use hypernotes_core::{
    HistoryAction, Lifecycle, PageService, ServiceError, TaskService,
};
use rusqlite::Connection;

fn names(pages: &[hypernotes_core::Page]) -> Vec<&str> {
    pages.iter().map(|page| page.name.as_str()).collect()
}

#[test]
fn create_page_inserts_active_page_and_logs_once() {
    let conn = open_db_in_memory().unwrap();
    let service = PageService::try_from_conn(&conn).unwrap();

    let page = service.create_page("  Groceries ").unwrap().unwrap();
    assert_eq!(page.name, "Groceries");
    assert_eq!(page.lifecycle, Lifecycle::Active);
    assert!(page.created_at > 0);

    let history = service.history();
    assert_eq!(history.count(None).unwrap(), 1);
    let entry = &history.recent(1).unwrap()[0];
    assert_eq!(entry.action, HistoryAction::CreatePage);
    assert_eq!(entry.details, "Created page: Groceries");
}

#[test]
fn blank_page_name_is_a_silent_noop() {
    let conn = open_db_in_memory().unwrap();
    let service = PageService::try_from_conn(&conn).unwrap();

    assert!(service.create_page("   \t").unwrap().is_none());
    assert!(service.list_pages().unwrap().is_empty());
    assert_eq!(service.history().count(None).unwrap(), 0);
}

#[test]
fn list_pages_is_newest_first_and_ids_are_unique() {
    let conn = open_db_in_memory().unwrap();
    let service = PageService::try_from_conn(&conn).unwrap();
    let first = service.create_page("first").unwrap().unwrap();
    let second = service.create_page("second").unwrap().unwrap();
    let third = service.create_page("third").unwrap().unwrap();

    assert!(first.id < second.id && second.id < third.id);
    assert_eq!(
        names(&service.list_pages().unwrap()),
        vec!["third", "second", "first"]
    );
}

#[test]
fn deleted_page_leaves_list_and_returns_once_after_restore() {
    let conn = open_db_in_memory().unwrap();
    let service = PageService::try_from_conn(&conn).unwrap();
    let page = service.create_page("Groceries").unwrap().unwrap();
    service.create_page("Chores").unwrap();

    service.delete_page(page.id).unwrap();
    assert_eq!(names(&service.list_pages().unwrap()), vec!["Chores"]);
    assert_eq!(
        names(&service.list_deleted_pages().unwrap()),
        vec!["Groceries"]
    );

    service.restore_page(page.id).unwrap();
    let listed = service.list_pages().unwrap();
    assert_eq!(
        listed.iter().filter(|p| p.id == page.id).count(),
        1,
        "restored page must appear exactly once"
    );
    assert!(service.list_deleted_pages().unwrap().is_empty());

    let history = service.history();
    assert_eq!(history.count(Some(HistoryAction::DeletePage)).unwrap(), 1);
    assert_eq!(history.count(Some(HistoryAction::RestorePage)).unwrap(), 1);
}

#[test]
fn rename_updates_name_and_logs_old_and_new() {
    let conn = open_db_in_memory().unwrap();
    let service = PageService::try_from_conn(&conn).unwrap();
    let page = service.create_page("Groceries").unwrap().unwrap();

    assert!(service.rename_page(page.id, " Shopping ").unwrap());
    let renamed = service.get_page(page.id).unwrap().unwrap();
    assert_eq!(renamed.name, "Shopping");
    assert_eq!(renamed.id, page.id);
    assert_eq!(renamed.created_at, page.created_at);

    let entry = &service.history().recent(1).unwrap()[0];
    assert_eq!(entry.action, HistoryAction::RenamePage);
    assert_eq!(entry.details, "Renamed page from \"Groceries\" to \"Shopping\"");
}

#[test]
fn rename_to_same_or_blank_name_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = PageService::try_from_conn(&conn).unwrap();
    let page = service.create_page("Groceries").unwrap().unwrap();
    let before = service.history().count(None).unwrap();

    assert!(!service.rename_page(page.id, "Groceries").unwrap());
    assert!(!service.rename_page(page.id, "  Groceries  ").unwrap());
    assert!(!service.rename_page(page.id, "   ").unwrap());

    assert_eq!(service.get_page(page.id).unwrap().unwrap(), page);
    assert_eq!(service.history().count(None).unwrap(), before);
}

#[test]
fn failed_rename_keeps_prior_name_and_logs_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = PageService::try_from_conn(&conn).unwrap();
    let page = service.create_page("Groceries").unwrap().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_rename BEFORE UPDATE OF name ON pages
         BEGIN SELECT RAISE(ABORT, 'rename rejected'); END;",
    )
    .unwrap();

    let err = service.rename_page(page.id, "Shopping").unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));
    assert_eq!(
        service.get_page(page.id).unwrap().unwrap().name,
        "Groceries"
    );
    assert_eq!(
        service
            .history()
            .count(Some(HistoryAction::RenamePage))
            .unwrap(),
        0
    );
}

#[test]
fn missing_page_operations_report_not_found_without_history() {
    let conn = open_db_in_memory().unwrap();
    let service = PageService::try_from_conn(&conn).unwrap();

    assert!(matches!(
        service.rename_page(42, "x"),
        Err(ServiceError::PageNotFound(42))
    ));
    assert!(matches!(
        service.delete_page(42),
        Err(ServiceError::PageNotFound(42))
    ));
    assert!(matches!(
        service.restore_page(42),
        Err(ServiceError::PageNotFound(42))
    ));
    assert!(service.get_page(42).unwrap().is_none());
    assert_eq!(service.history().count(None).unwrap(), 0);
}

#[test]
fn get_page_still_finds_deleted_pages() {
    let conn = open_db_in_memory().unwrap();
    let service = PageService::try_from_conn(&conn).unwrap();
    let page = service.create_page("Archive").unwrap().unwrap();
    service.delete_page(page.id).unwrap();

    let loaded = service.get_page(page.id).unwrap().unwrap();
    assert_eq!(loaded.lifecycle, Lifecycle::Deleted);
}

#[test]
fn search_pages_matches_case_insensitive_substring() {
    let conn = open_db_in_memory().unwrap();
    let service = PageService::try_from_conn(&conn).unwrap();
    service.create_page("Weekly Groceries").unwrap();
    service.create_page("Chores").unwrap();
    let hidden = service.create_page("Groceries archive").unwrap().unwrap();
    service.delete_page(hidden.id).unwrap();

    assert_eq!(
        names(&service.search_pages("GROC").unwrap()),
        vec!["Weekly Groceries"]
    );
    assert_eq!(service.search_pages("").unwrap().len(), 2);
    assert!(service.search_pages("garden").unwrap().is_empty());
}

#[test]
fn deleting_a_page_does_not_cascade_to_its_tasks() {
    let conn = open_db_in_memory().unwrap();
    let pages = PageService::try_from_conn(&conn).unwrap();
    let tasks = TaskService::try_from_conn(&conn).unwrap();
    let page = pages.create_page("Groceries").unwrap().unwrap();
    let milk = tasks.create_task(page.id, "Milk").unwrap().unwrap();

    pages.delete_page(page.id).unwrap();

    let still_listed = tasks.list_tasks(page.id).unwrap();
    assert_eq!(still_listed.len(), 1);
    assert_eq!(still_listed[0].id, milk.id);
    assert_eq!(still_listed[0].lifecycle, Lifecycle::Active);
    assert!(tasks.list_deleted_tasks().unwrap().is_empty());
}

#[test]
fn corrupt_lifecycle_value_is_reported_not_masked() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE pages (id INTEGER PRIMARY KEY, name TEXT, created_at INTEGER, is_deleted INTEGER);
         CREATE TABLE history (id INTEGER PRIMARY KEY, action TEXT, details TEXT, timestamp INTEGER);
         INSERT INTO pages (id, name, created_at, is_deleted) VALUES (1, 'odd', 0, 7);",
    )
    .unwrap();
    let service = PageService::try_from_conn(&conn).unwrap();

    let err = service.get_page(1).unwrap_err();
    assert!(err.to_string().contains("is_deleted"));
}
