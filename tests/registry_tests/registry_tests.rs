//! Registry Tests
//!
//! Tests verify:
//! - Create/destroy lifecycle and its error cases
//! - Seeding from configuration
//! - Listing consistency
//! - Stale store handles after destroy
//! - Concurrent create/destroy

use std::sync::Arc;
use std::thread;

use serde_json::Map;
use sofadb::config::Config;
use sofadb::document::Document;
use sofadb::registry::Registry;
use sofadb::store::StorageBackend;
use sofadb::SofaError;

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_new_registry_is_empty() {
    let registry = Registry::new();
    assert!(registry.is_empty());
    assert!(registry.list().is_empty());
    assert_eq!(registry.backend(), StorageBackend::Memory);
}

#[test]
fn test_with_config_seeds_default() {
    let registry = Registry::with_config(&Config::default()).unwrap();
    assert_eq!(registry.list(), vec!["default".to_string()]);
    assert!(registry.contains("default"));
}

#[test]
fn test_with_config_rejects_duplicate_seed() {
    let config = Config::builder().initial_databases(["a", "a"]).build();
    assert!(matches!(
        Registry::with_config(&config),
        Err(SofaError::DatabaseExists(name)) if name == "a"
    ));
}

#[test]
fn test_create_then_get() {
    let registry = Registry::new();
    registry.create("books").unwrap();

    let store = registry.get("books").unwrap();
    assert_eq!(store.name(), "books");
    assert_eq!(store.info().unwrap().doc_count, 0);
}

#[test]
fn test_create_twice_fails() {
    let registry = Registry::new();
    registry.create("books").unwrap();

    let err = registry.create("books").unwrap_err();
    assert!(matches!(err, SofaError::DatabaseExists(name) if name == "books"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_destroy_then_get_fails() {
    let registry = Registry::new();
    registry.create("books").unwrap();
    registry.destroy("books").unwrap();

    assert!(matches!(registry.get("books"), Err(SofaError::DatabaseNotFound(_))));
    assert!(!registry.contains("books"));
}

#[test]
fn test_destroy_unknown_fails() {
    let registry = Registry::new();
    let err = registry.destroy("never").unwrap_err();
    assert!(matches!(err, SofaError::DatabaseNotFound(name) if name == "never"));
}

#[test]
fn test_recreate_after_destroy_is_empty() {
    let registry = Registry::new();
    registry.create("books").unwrap();
    registry
        .get("books")
        .unwrap()
        .create_or_update(Document::new("a", Map::new()))
        .unwrap();

    registry.destroy("books").unwrap();
    registry.create("books").unwrap();

    let store = registry.get("books").unwrap();
    assert!(matches!(store.get("a"), Err(SofaError::DocumentNotFound(_))));
}

#[test]
fn test_create_with_explicit_backend() {
    let registry = Registry::new();
    registry.create_with("mem", StorageBackend::Memory).unwrap();
    assert!(registry.contains("mem"));
}

// =============================================================================
// Listing Tests
// =============================================================================

#[test]
fn test_list_after_create_and_destroy() {
    let registry = Registry::with_config(&Config::default()).unwrap();
    registry.create("a").unwrap();
    registry.create("b").unwrap();
    registry.destroy("a").unwrap();

    assert_eq!(registry.list(), vec!["b".to_string(), "default".to_string()]);
}

// =============================================================================
// Stale Handle Tests
// =============================================================================

#[test]
fn test_handle_to_destroyed_store_fails_cleanly() {
    let registry = Registry::new();
    registry.create("books").unwrap();
    let store = registry.get("books").unwrap();
    let rev = store
        .create_or_update(Document::new("a", Map::new()))
        .unwrap();

    registry.destroy("books").unwrap();

    assert!(matches!(store.get("a"), Err(SofaError::DocumentNotFound(_))));
    assert!(matches!(store.delete("a", &rev), Err(SofaError::DocumentNotFound(_))));
    assert!(matches!(
        store.create_or_update(Document::new("b", Map::new())),
        Err(SofaError::DatabaseNotFound(_))
    ));
    assert!(matches!(store.info(), Err(SofaError::DatabaseNotFound(_))));

    // A new database under the same name is unaffected by the old handle
    registry.create("books").unwrap();
    assert_eq!(registry.get("books").unwrap().info().unwrap().doc_count, 0);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_create_same_name_single_winner() {
    let registry = Arc::new(Registry::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.create("contended").is_ok())
        })
        .collect();

    let created = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(created, 1);
    assert_eq!(registry.list(), vec!["contended".to_string()]);
}

#[test]
fn test_concurrent_create_destroy_distinct_names() {
    let registry = Arc::new(Registry::new());

    let mut handles = vec![];
    for t in 0..4 {
        let registry = Arc::clone(&registry);
        handles.push(thread::spawn(move || {
            for i in 0..50 {
                let name = format!("t{}_db{}", t, i);
                registry.create(&name).unwrap();
                if i % 2 == 0 {
                    registry.destroy(&name).unwrap();
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let names = registry.list();
    assert_eq!(names.len(), 100);
    assert!(names.iter().all(|n| {
        let i: usize = n.rsplit("db").next().unwrap().parse().unwrap();
        i % 2 == 1
    }));
}
