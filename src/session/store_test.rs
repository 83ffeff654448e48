//! Tests for the session store.

use std::sync::Arc;

use super::SessionStore;

#[test]
fn test_insert_and_get() {
    let store = SessionStore::new();
    let session = Arc::new("transport-a");

    assert!(store.insert("S1", Arc::clone(&session)));

    assert_eq!(store.len(), 1);
    assert!(store.contains("S1"));
    assert!(Arc::ptr_eq(&store.get("S1").unwrap(), &session));
    assert!(store.get("S2").is_none());
}

#[test]
fn test_insert_refuses_taken_id() {
    let store = SessionStore::new();
    let first = Arc::new(1);
    let second = Arc::new(2);

    assert!(store.insert("S1", Arc::clone(&first)));
    assert!(!store.insert("S1", Arc::clone(&second)));

    assert!(store.is_registered("S1", &first));
    assert!(!store.is_registered("S1", &second));
}

#[test]
fn test_remove_if_same_ignores_other_sessions() {
    let store = SessionStore::new();
    let stale = Arc::new("stale");
    let current = Arc::new("current");
    store.insert("S1", Arc::clone(&current));

    assert!(!store.remove_if_same("S1", &Arc::downgrade(&stale)));
    assert!(store.contains("S1"));

    assert!(store.remove_if_same("S1", &Arc::downgrade(&current)));
    assert!(store.is_empty());

    // Second removal is a no-op
    assert!(!store.remove_if_same("S1", &Arc::downgrade(&current)));
}

#[test]
fn test_clones_share_the_same_map() {
    let store = SessionStore::new();
    let handle = store.clone();

    handle.insert("S1", Arc::new(()));

    assert_eq!(store.len(), 1);
    assert!(store.remove("S1").is_some());
    assert!(handle.is_empty());
}

#[test]
fn test_snapshot_and_clear() {
    let store = SessionStore::new();
    store.insert("S1", Arc::new(1));
    store.insert("S2", Arc::new(2));

    let mut ids: Vec<String> = store.snapshot().into_iter().map(|(id, _)| id).collect();
    ids.sort();
    assert_eq!(ids, vec!["S1", "S2"]);

    store.clear();
    assert!(store.is_empty());
}
