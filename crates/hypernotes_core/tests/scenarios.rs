//! End-to-end flows across pages, tasks, the bin and history.

use hypernotes_core::{load_bin, PageService, Store, TaskService};

#[test]
fn groceries_page_lifecycle_through_the_bin() {
    let store = Store::open_in_memory().unwrap();
    let pages = PageService::try_from_conn(store.conn()).unwrap();
    let tasks = TaskService::try_from_conn(store.conn()).unwrap();

    let page = pages.create_page("Groceries").unwrap().unwrap();
    let listed: Vec<_> = pages.list_pages().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(listed, vec!["Groceries"]);

    pages.delete_page(page.id).unwrap();
    assert!(pages.list_pages().unwrap().is_empty());
    let bin: Vec<_> = load_bin(&pages, &tasks)
        .unwrap()
        .pages
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(bin, vec!["Groceries"]);

    pages.restore_page(page.id).unwrap();
    let listed: Vec<_> = pages.list_pages().unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(listed, vec!["Groceries"]);
    assert!(load_bin(&pages, &tasks).unwrap().pages.is_empty());
}

#[test]
fn milk_task_completion_round_trip() {
    let store = Store::open_in_memory().unwrap();
    let pages = PageService::try_from_conn(store.conn()).unwrap();
    let tasks = TaskService::try_from_conn(store.conn()).unwrap();
    let page = pages.create_page("Groceries").unwrap().unwrap();

    tasks.create_task(page.id, "Milk").unwrap();
    let listed = tasks.list_tasks(page.id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Milk");
    assert!(!listed[0].completed);
    assert_eq!(listed[0].completed_at, None);

    let completed = tasks.toggle_completion(listed[0].id).unwrap();
    assert!(completed.completed);
    assert!(completed.completed_at.is_some());

    let reopened = tasks.toggle_completion(listed[0].id).unwrap();
    assert!(!reopened.completed);
    assert_eq!(reopened.completed_at, None);
}

#[test]
fn eggs_notes_last_write_wins() {
    let store = Store::open_in_memory().unwrap();
    let pages = PageService::try_from_conn(store.conn()).unwrap();
    let tasks = TaskService::try_from_conn(store.conn()).unwrap();
    let page = pages.create_page("Groceries").unwrap().unwrap();

    let eggs = tasks.create_task(page.id, "Eggs").unwrap().unwrap();
    tasks.update_notes(eggs.id, "buy 12").unwrap();
    tasks.update_notes(eggs.id, "buy 18").unwrap();

    assert_eq!(tasks.get_task(eggs.id).unwrap().unwrap().notes, "buy 18");
}

#[test]
fn store_close_is_explicit_and_clean() {
    let store = Store::open_in_memory().unwrap();
    {
        let pages = PageService::try_from_conn(store.conn()).unwrap();
        pages.create_page("Scratch").unwrap();
    }
    store.close().unwrap();
}
