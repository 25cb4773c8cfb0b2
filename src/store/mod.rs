//! Store Module
//!
//! Per-database document storage with optimistic concurrency.
//!
//! ## Responsibilities
//! - Hold the single live version of every document in one database
//! - Check the caller's asserted revision before every write or delete
//! - Issue a fresh revision for every accepted write
//! - Report database info snapshots
//!
//! ## Revision Rules
//! ```text
//! stored?  asserted rev      outcome
//! ───────  ────────────────  ─────────────────────────────
//! no       empty             create, new rev (generation 1)
//! no       non-empty         Conflict
//! yes      == stored rev     replace body, new rev
//! yes      != stored rev     Conflict
//! ```
//!
//! Backends implement [`DocumentStore`]; the registry picks one per database
//! through [`StorageBackend`] when the database is created.

mod memory;

use std::sync::Arc;

use crate::document::{DbInfo, Document, Revision};
use crate::error::Result;

pub use memory::MemoryStore;

/// Capability set every storage backend provides
///
/// Each call is atomic with respect to every other call on the same store.
pub trait DocumentStore: Send + Sync {
    /// Name of the database this store backs
    fn name(&self) -> &str;

    /// Fetch the current version of a document
    fn get(&self, id: &str) -> Result<Document>;

    /// Create or update a document, returning its new revision
    ///
    /// `doc.rev` is the revision the caller believes is current (empty when
    /// the caller expects the document not to exist).
    fn create_or_update(&self, doc: Document) -> Result<Revision>;

    /// Remove a document, returning the revision that was deleted
    fn delete(&self, id: &str, rev: &Revision) -> Result<Revision>;

    /// Snapshot of the database counters
    fn info(&self) -> Result<DbInfo>;

    /// Release all documents; later calls fail cleanly
    fn close(&self);
}

/// Available storage variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// Volatile, process-local storage
    #[default]
    Memory,
}

impl StorageBackend {
    /// Build an empty store of this variant for database `name`
    pub fn open(self, name: &str) -> Arc<dyn DocumentStore> {
        match self {
            StorageBackend::Memory => Arc::new(MemoryStore::new(name)),
        }
    }
}
