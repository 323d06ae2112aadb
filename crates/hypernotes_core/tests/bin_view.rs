use hypernotes_core::db::open_db_in_memory;
use hypernotes_core::{load_bin, PageService, TaskService};

#[test]
fn empty_store_has_empty_bin() {
    let conn = open_db_in_memory().unwrap();
    let pages = PageService::try_from_conn(&conn).unwrap();
    let tasks = TaskService::try_from_conn(&conn).unwrap();

    assert!(load_bin(&pages, &tasks).unwrap().is_empty());
}

#[test]
fn bin_lists_deleted_pages_and_tasks_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let pages = PageService::try_from_conn(&conn).unwrap();
    let tasks = TaskService::try_from_conn(&conn).unwrap();
    let groceries = pages.create_page("Groceries").unwrap().unwrap();
    let chores = pages.create_page("Chores").unwrap().unwrap();
    pages.create_page("Garden").unwrap();
    let milk = tasks.create_task(groceries.id, "Milk").unwrap().unwrap();
    let sweep = tasks.create_task(chores.id, "Sweep").unwrap().unwrap();
    tasks.create_task(chores.id, "Dust").unwrap();

    pages.delete_page(groceries.id).unwrap();
    pages.delete_page(chores.id).unwrap();
    tasks.delete_task(milk.id).unwrap();
    tasks.delete_task(sweep.id).unwrap();

    let bin = load_bin(&pages, &tasks).unwrap();
    let page_names: Vec<_> = bin.pages.iter().map(|page| page.name.as_str()).collect();
    let task_titles: Vec<_> = bin.tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(page_names, vec!["Chores", "Groceries"]);
    assert_eq!(task_titles, vec!["Sweep", "Milk"]);
}

#[test]
fn restoring_from_bin_removes_item_from_bin() {
    let conn = open_db_in_memory().unwrap();
    let pages = PageService::try_from_conn(&conn).unwrap();
    let tasks = TaskService::try_from_conn(&conn).unwrap();
    let page = pages.create_page("Groceries").unwrap().unwrap();
    let task = tasks.create_task(page.id, "Milk").unwrap().unwrap();
    pages.delete_page(page.id).unwrap();
    tasks.delete_task(task.id).unwrap();

    pages.restore_page(page.id).unwrap();
    let bin = load_bin(&pages, &tasks).unwrap();
    assert!(bin.pages.is_empty());
    assert_eq!(bin.tasks.len(), 1);

    tasks.restore_task(task.id).unwrap();
    assert!(load_bin(&pages, &tasks).unwrap().is_empty());
}

#[test]
fn bin_serializes_lifecycle_as_snake_case_tag() {
    let conn = open_db_in_memory().unwrap();
    let pages = PageService::try_from_conn(&conn).unwrap();
    let tasks = TaskService::try_from_conn(&conn).unwrap();
    let page = pages.create_page("Groceries").unwrap().unwrap();
    pages.delete_page(page.id).unwrap();

    let json = serde_json::to_value(load_bin(&pages, &tasks).unwrap()).unwrap();
    assert_eq!(json["pages"][0]["lifecycle"], "deleted");
    assert_eq!(json["tasks"], serde_json::json!([]));
}
