use categorist::repositories::{CategoryRepository, PriorityRepository, TaskRepository};
use categorist::source::NewTask;
use categorist::storage::LocalStorage;

#[tokio::test]
async fn test_local_storage_creation() {
    let result = LocalStorage::connect("sqlite::memory:").await;
    assert!(result.is_ok(), "LocalStorage should be created successfully");
}

#[tokio::test]
async fn test_priorities_are_seeded_heaviest_first() {
    let storage = LocalStorage::connect("sqlite::memory:").await.unwrap();
    let priorities = PriorityRepository::get_all(&storage.conn).await.unwrap();

    let titles: Vec<&str> = priorities.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["High", "Medium", "Low"]);
}

#[tokio::test]
async fn test_category_search_is_substring_match() {
    let storage = LocalStorage::connect("sqlite::memory:").await.unwrap();
    CategoryRepository::create(&storage.conn, "Work").await.unwrap();
    CategoryRepository::create(&storage.conn, "Homework").await.unwrap();
    CategoryRepository::create(&storage.conn, "Garden").await.unwrap();

    let found = CategoryRepository::search(&storage.conn, "work").await.unwrap();
    let mut titles: Vec<String> = found.into_iter().map(|c| c.title).collect();
    titles.sort();
    assert_eq!(titles, vec!["Homework".to_string(), "Work".to_string()]);

    let all = CategoryRepository::search(&storage.conn, "").await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_clear_category_detaches_tasks() {
    let storage = LocalStorage::connect("sqlite::memory:").await.unwrap();
    let work = CategoryRepository::create(&storage.conn, "Work").await.unwrap();
    TaskRepository::create(&storage.conn, NewTask::new("a").in_category(work.id))
        .await
        .unwrap();
    TaskRepository::create(&storage.conn, NewTask::new("b").in_category(work.id))
        .await
        .unwrap();
    TaskRepository::create(&storage.conn, NewTask::new("c")).await.unwrap();

    let detached = TaskRepository::clear_category(&storage.conn, &work.id).await.unwrap();

    assert_eq!(detached, 2);
    assert_eq!(TaskRepository::count(&storage.conn, Some(work.id), None).await.unwrap(), 0);
    assert_eq!(TaskRepository::count(&storage.conn, None, None).await.unwrap(), 3);
}
