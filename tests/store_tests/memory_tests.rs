//! MemoryStore Tests
//!
//! Tests verify:
//! - Create, fetch, update and delete under the revision rules
//! - Conflicts leave stored state untouched
//! - Info counters
//! - Behaviour after the store is closed
//! - Concurrent writers racing on the same revision

use std::sync::Arc;
use std::thread;

use serde_json::{json, Value};
use sofadb::document::{Body, Document, Revision};
use sofadb::store::{DocumentStore, MemoryStore, StorageBackend};
use sofadb::SofaError;

// =============================================================================
// Helper Functions
// =============================================================================

fn body(value: Value) -> Body {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

fn doc(id: &str, value: Value) -> Document {
    Document::new(id, body(value))
}

// =============================================================================
// Create Tests
// =============================================================================

#[test]
fn test_create_returns_revision() {
    let store = MemoryStore::new("db");

    let rev = store.create_or_update(doc("a", json!({"n": 1}))).unwrap();

    assert!(!rev.is_empty());
    assert_eq!(rev.generation(), Some(1));

    let stored = store.get("a").unwrap();
    assert_eq!(stored.rev, rev);
    assert_eq!(stored.body, body(json!({"n": 1})));
}

#[test]
fn test_repeated_create_conflicts() {
    let store = MemoryStore::new("db");

    let rev = store.create_or_update(doc("a", json!({"n": 1}))).unwrap();
    let err = store.create_or_update(doc("a", json!({"n": 1}))).unwrap_err();

    assert!(matches!(err, SofaError::Conflict(_)));
    assert_eq!(store.get("a").unwrap().rev, rev);
}

#[test]
fn test_create_with_revision_for_missing_document_conflicts() {
    let store = MemoryStore::new("db");

    let err = store
        .create_or_update(doc("a", json!({})).with_rev("1-deadbeef"))
        .unwrap_err();

    assert!(matches!(err, SofaError::Conflict(_)));
    assert!(matches!(store.get("a"), Err(SofaError::DocumentNotFound(_))));
    assert!(store.is_empty());
}

#[test]
fn test_get_missing_document() {
    let store = MemoryStore::new("db");
    assert!(matches!(store.get("nope"), Err(SofaError::DocumentNotFound(id)) if id == "nope"));
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_update_with_current_revision() {
    let store = MemoryStore::new("db");

    let first = store.create_or_update(doc("a", json!({"n": 1}))).unwrap();
    let second = store
        .create_or_update(doc("a", json!({"n": 2})).with_rev(first.clone()))
        .unwrap();

    assert_ne!(first, second);
    assert_eq!(second.generation(), Some(2));

    let stored = store.get("a").unwrap();
    assert_eq!(stored.rev, second);
    assert_eq!(stored.body, body(json!({"n": 2})));
}

#[test]
fn test_old_revision_rejected_after_update() {
    let store = MemoryStore::new("db");

    let first = store.create_or_update(doc("a", json!({"n": 1}))).unwrap();
    let second = store
        .create_or_update(doc("a", json!({"n": 2})).with_rev(first.clone()))
        .unwrap();

    let err = store
        .create_or_update(doc("a", json!({"n": 3})).with_rev(first.clone()))
        .unwrap_err();
    assert!(matches!(err, SofaError::Conflict(_)));

    let err = store.delete("a", &first).unwrap_err();
    assert!(matches!(err, SofaError::Conflict(_)));

    let stored = store.get("a").unwrap();
    assert_eq!(stored.rev, second);
    assert_eq!(stored.body, body(json!({"n": 2})));
}

#[test]
fn test_update_with_empty_revision_conflicts() {
    let store = MemoryStore::new("db");
    store.create_or_update(doc("a", json!({}))).unwrap();

    let err = store
        .create_or_update(doc("a", json!({})).with_rev(Revision::empty()))
        .unwrap_err();
    assert!(matches!(err, SofaError::Conflict(_)));
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_with_current_revision() {
    let store = MemoryStore::new("db");
    let rev = store.create_or_update(doc("a", json!({}))).unwrap();

    let deleted = store.delete("a", &rev).unwrap();

    assert_eq!(deleted, rev);
    assert!(matches!(store.get("a"), Err(SofaError::DocumentNotFound(_))));
}

#[test]
fn test_delete_with_stale_revision_keeps_document() {
    let store = MemoryStore::new("db");
    let rev = store.create_or_update(doc("a", json!({"keep": true}))).unwrap();

    let err = store.delete("a", &Revision::from("1-stale")).unwrap_err();
    assert!(matches!(err, SofaError::Conflict(_)));

    let stored = store.get("a").unwrap();
    assert_eq!(stored.rev, rev);
    assert_eq!(stored.body, body(json!({"keep": true})));
}

#[test]
fn test_delete_missing_document() {
    let store = MemoryStore::new("db");
    let err = store.delete("nope", &Revision::empty()).unwrap_err();
    assert!(matches!(err, SofaError::DocumentNotFound(_)));
}

#[test]
fn test_recreate_after_delete_starts_fresh() {
    let store = MemoryStore::new("db");
    let first = store.create_or_update(doc("a", json!({"v": 1}))).unwrap();
    store.delete("a", &first).unwrap();

    // The old revision means nothing once the document is gone
    let err = store
        .create_or_update(doc("a", json!({"v": 2})).with_rev(first.clone()))
        .unwrap_err();
    assert!(matches!(err, SofaError::Conflict(_)));

    let again = store.create_or_update(doc("a", json!({"v": 2}))).unwrap();
    assert_eq!(again.generation(), Some(1));
    assert_ne!(again, first);
}

// =============================================================================
// Info Tests
// =============================================================================

#[test]
fn test_info_counters() {
    let store = MemoryStore::new("stats");

    let a = store.create_or_update(doc("a", json!({}))).unwrap();
    store.create_or_update(doc("b", json!({}))).unwrap();
    let a = store
        .create_or_update(doc("a", json!({"x": 1})).with_rev(a))
        .unwrap();
    store.delete("a", &a).unwrap();

    // Rejected writes do not count
    assert!(store.create_or_update(doc("b", json!({}))).is_err());

    let info = store.info().unwrap();
    assert_eq!(info.db_name, "stats");
    assert_eq!(info.doc_count, 1);
    assert_eq!(info.doc_del_count, 1);
    assert_eq!(info.update_seq, 4);
    assert_eq!(info.purge_seq, 0);
    assert!(!info.compact_running);
    assert!(info.instance_start_time.parse::<u128>().is_ok());
}

#[test]
fn test_info_serializes_all_fields() {
    let store = MemoryStore::new("db");
    let value = serde_json::to_value(store.info().unwrap()).unwrap();
    let object = value.as_object().unwrap();

    for key in [
        "db_name",
        "compact_running",
        "disk_format_version",
        "disk_size",
        "doc_count",
        "doc_del_count",
        "instance_start_time",
        "purge_seq",
        "update_seq",
    ] {
        assert!(object.contains_key(key), "missing {}", key);
    }
    assert_eq!(object.len(), 9);
}

// =============================================================================
// Closed Store Tests
// =============================================================================

#[test]
fn test_closed_store_fails_cleanly() {
    let store = MemoryStore::new("gone");
    let rev = store.create_or_update(doc("a", json!({}))).unwrap();

    store.close();

    assert!(store.is_closed());
    assert!(matches!(store.get("a"), Err(SofaError::DocumentNotFound(_))));
    assert!(matches!(store.delete("a", &rev), Err(SofaError::DocumentNotFound(_))));
    assert!(matches!(
        store.create_or_update(doc("b", json!({}))),
        Err(SofaError::DatabaseNotFound(name)) if name == "gone"
    ));
    assert!(matches!(store.info(), Err(SofaError::DatabaseNotFound(_))));
}

#[test]
fn test_backend_opens_memory_store() {
    let store = StorageBackend::Memory.open("via_backend");
    assert_eq!(store.name(), "via_backend");
    assert_eq!(store.info().unwrap().doc_count, 0);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_updates_same_revision_single_winner() {
    let store = Arc::new(MemoryStore::new("race"));
    let base = store.create_or_update(doc("a", json!({"v": 0}))).unwrap();

    let mut handles = vec![];
    for t in 0..16 {
        let store = Arc::clone(&store);
        let base = base.clone();
        handles.push(thread::spawn(move || {
            store.create_or_update(doc("a", json!({ "v": t })).with_rev(base))
        }));
    }

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners: Vec<&Revision> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(SofaError::Conflict(_))))
        .count();

    assert_eq!(winners.len(), 1);
    assert_eq!(conflicts, 15);
    assert_eq!(&store.get("a").unwrap().rev, winners[0]);
    assert_eq!(store.info().unwrap().update_seq, 2);
}

#[test]
fn test_concurrent_creates_same_id_single_winner() {
    let store = Arc::new(MemoryStore::new("race"));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.create_or_update(doc("same", json!({}))).is_ok())
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(successes, 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_concurrent_writers_distinct_ids() {
    let store = Arc::new(MemoryStore::new("many"));

    let mut handles = vec![];
    for t in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..100 {
                let id = format!("thread{}_doc{}", t, i);
                let rev = store.create_or_update(doc(&id, json!({"i": i}))).unwrap();
                store
                    .create_or_update(doc(&id, json!({"i": i + 1})).with_rev(rev))
                    .unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let info = store.info().unwrap();
    assert_eq!(info.doc_count, 400);
    assert_eq!(info.update_seq, 800);
    assert_eq!(
        store.get("thread3_doc99").unwrap().body,
        body(json!({"i": 100}))
    );
}
