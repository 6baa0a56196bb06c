use categorist::entities::category;
use categorist::sync::{sort_categories, CategoryIndex};
use uuid::Uuid;

fn category(title: &str) -> category::Model {
    category::Model {
        id: Uuid::new_v4(),
        title: title.to_string(),
    }
}

#[test]
fn test_set_inserts_and_replaces() {
    let mut index = CategoryIndex::new();
    let work = category("Work");

    assert!(index.set(&work, 3));
    assert_eq!(index.count(&work.id), Some(3));
    assert_eq!(index.len(), 1);

    assert!(index.set(&work, 5));
    assert_eq!(index.count(&work.id), Some(5));
    assert_eq!(index.len(), 1, "set must not duplicate an existing entry");
}

#[test]
fn test_delete_is_noop_when_absent() {
    let mut index = CategoryIndex::new();
    let work = category("Work");
    assert!(index.delete(&work.id).is_none());
    assert!(index.is_empty());
}

#[test]
fn test_deleted_category_rejects_later_writes() {
    let mut index = CategoryIndex::new();
    let work = category("Work");
    index.set(&work, 2);

    let removed = index.delete(&work.id).expect("entry should exist");
    assert_eq!(removed.count, 2);

    assert!(!index.set(&work, 7));
    assert!(!index.contains(&work.id));
    assert!(index.is_deleted(&work.id));
}

#[test]
fn test_older_ticket_does_not_overwrite_newer() {
    let mut index = CategoryIndex::new();
    let work = category("Work");

    let older = index.issue_ticket();
    let newer = index.issue_ticket();

    assert!(index.apply(&work, 3, newer));
    assert!(!index.apply(&work, 4, older));
    assert_eq!(index.count(&work.id), Some(3));
}

#[test]
fn test_rebuild_clears_and_discards_pre_rebuild_results() {
    let mut index = CategoryIndex::new();
    let work = category("Work");
    let home = category("Home");
    index.set(&work, 1);

    let before_rebuild = index.issue_ticket();
    let requests = index.rebuild(&[work.clone(), home.clone()]);

    assert!(index.is_empty(), "rebuild starts from an empty index");
    assert_eq!(requests.len(), 2);
    assert!(!index.apply(&work, 9, before_rebuild));

    // Results land one at a time
    let (first, first_ticket) = requests[0].clone();
    assert!(index.apply(&first, 4, first_ticket));
    assert_eq!(index.len(), 1);
    let (second, second_ticket) = requests[1].clone();
    assert!(index.apply(&second, 0, second_ticket));
    assert_eq!(index.len(), 2);
    assert_eq!(index.count(&work.id), Some(4));
    assert_eq!(index.count(&home.id), Some(0));
}

#[test]
fn test_rebuild_skips_deleted_categories() {
    let mut index = CategoryIndex::new();
    let work = category("Work");
    let home = category("Home");
    index.delete(&work.id);

    let requests = index.rebuild(&[work, home.clone()]);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, home);
}

#[test]
fn test_is_stale_after_delete_or_rebuild() {
    let mut index = CategoryIndex::new();
    let work = category("Work");
    let home = category("Home");

    let before_rebuild = index.issue_ticket();
    assert!(!index.is_stale(&work, before_rebuild));

    let requests = index.rebuild(&[work.clone(), home.clone()]);
    assert!(index.is_stale(&work, before_rebuild));
    assert!(!index.is_stale(&work, requests[0].1));

    index.delete(&home.id);
    assert!(index.is_stale(&home, requests[1].1));
    let after_delete = index.issue_ticket();
    assert!(index.is_stale(&home, after_delete));
}

#[test]
fn test_entries_sorted_case_insensitively() {
    let mut index = CategoryIndex::new();
    index.set(&category("work"), 1);
    index.set(&category("Errands"), 2);
    index.set(&category("Home"), 3);

    let titles: Vec<String> = index.entries().into_iter().map(|e| e.category.title).collect();
    assert_eq!(titles, vec!["Errands", "Home", "work"]);
}

#[test]
fn test_sort_categories_is_stable() {
    let first = category("Inbox");
    let second = category("inbox");
    let third = category("Archive");
    let mut categories = vec![first.clone(), second.clone(), third.clone()];

    sort_categories(&mut categories);

    assert_eq!(categories, vec![third, first, second]);
}
