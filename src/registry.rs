//! Registry Module
//!
//! Process-wide mapping from database name to its document store.
//!
//! ## Responsibilities
//! - Create and destroy databases
//! - Resolve a database name to its store for the handlers
//! - Seed the configured initial databases (`default` unless configured
//!   otherwise) when built from a [`Config`]
//!
//! Names are not validated here: the route table only hands well-formed,
//! non-reserved names to the handlers that call in.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::Config;
use crate::error::{Result, SofaError};
use crate::store::{DocumentStore, StorageBackend};

/// Database registry
///
/// ## Concurrency Model
///
/// - `databases`: one RwLock; `create`/`destroy` take the write guard,
///   `get`/`list`/`contains` the read guard
/// - Stores are handed out as `Arc`s. `destroy` closes the store while still
///   holding the write guard, so a handle obtained earlier fails cleanly from
///   then on instead of writing into a database nobody can reach.
pub struct Registry {
    /// Bound databases
    databases: RwLock<HashMap<String, Arc<dyn DocumentStore>>>,

    /// Backend used by `create`
    backend: StorageBackend,
}

impl Registry {
    /// Create an empty registry using the in-memory backend
    pub fn new() -> Self {
        Self::with_backend(StorageBackend::default())
    }

    /// Create an empty registry whose databases use `backend`
    pub fn with_backend(backend: StorageBackend) -> Self {
        Self {
            databases: RwLock::new(HashMap::new()),
            backend,
        }
    }

    /// Create a registry and seed it with the configured databases
    pub fn with_config(config: &Config) -> Result<Self> {
        let registry = Self::with_backend(config.backend);
        for name in &config.initial_databases {
            registry.create(name)?;
        }
        Ok(registry)
    }

    /// Create a database using the registry's backend
    pub fn create(&self, name: &str) -> Result<()> {
        self.create_with(name, self.backend)
    }

    /// Create a database using an explicit backend
    pub fn create_with(&self, name: &str, backend: StorageBackend) -> Result<()> {
        let mut databases = self.databases.write();
        if databases.contains_key(name) {
            return Err(SofaError::DatabaseExists(name.to_string()));
        }

        databases.insert(name.to_string(), backend.open(name));
        tracing::info!("Created database {} ({:?})", name, backend);
        Ok(())
    }

    /// Destroy a database and release its documents
    pub fn destroy(&self, name: &str) -> Result<()> {
        let mut databases = self.databases.write();
        let store = databases
            .remove(name)
            .ok_or_else(|| SofaError::DatabaseNotFound(name.to_string()))?;

        store.close();
        tracing::info!("Destroyed database {}", name);
        Ok(())
    }

    /// Look up the store bound to `name`
    pub fn get(&self, name: &str) -> Result<Arc<dyn DocumentStore>> {
        self.databases
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| SofaError::DatabaseNotFound(name.to_string()))
    }

    /// True if `name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.databases.read().contains_key(name)
    }

    /// All bound database names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.databases.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of bound databases
    pub fn len(&self) -> usize {
        self.databases.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Backend used for new databases
    pub fn backend(&self) -> StorageBackend {
        self.backend
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
