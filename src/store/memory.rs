//! In-memory document store
//!
//! HashMap-based store with a single RwLock for concurrency.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;

use crate::document::{DbInfo, Document, Revision, RevisionGenerator};
use crate::error::{Result, SofaError};

use super::DocumentStore;

/// Volatile document store for one database
///
/// ## Concurrency:
/// - `state`: one RwLock over documents, counters and the closed flag
/// - Reads (`get`, `info`) share the read guard
/// - Writes (`create_or_update`, `delete`, `close`) hold the write guard for
///   the whole revision check-and-set, so no two writers interleave
pub struct MemoryStore {
    /// Database name (for info and error messages)
    name: String,

    /// Creation time, microseconds since the UNIX epoch
    instance_start_time: String,

    /// Source of new revision tokens
    revisions: RevisionGenerator,

    /// Everything mutable
    state: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    /// Live documents by id
    docs: HashMap<String, Document>,

    /// Accepted writes and deletes since creation
    update_seq: u64,

    /// Accepted deletes since creation
    doc_del_count: u64,

    /// Set once the owning database is destroyed
    closed: bool,
}

impl MemoryStore {
    /// Create an empty store for database `name`
    pub fn new(name: impl Into<String>) -> Self {
        let micros = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros())
            .unwrap_or(0);

        Self {
            name: name.into(),
            instance_start_time: micros.to_string(),
            revisions: RevisionGenerator::new(),
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Number of live documents
    pub fn len(&self) -> usize {
        self.state.read().docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once `close` has been called
    pub fn is_closed(&self) -> bool {
        self.state.read().closed
    }

    fn closed_error(&self) -> SofaError {
        SofaError::DatabaseNotFound(self.name.clone())
    }
}

impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, id: &str) -> Result<Document> {
        let state = self.state.read();

        // A closed store has no documents
        state
            .docs
            .get(id)
            .cloned()
            .ok_or_else(|| SofaError::DocumentNotFound(id.to_string()))
    }

    fn create_or_update(&self, mut doc: Document) -> Result<Revision> {
        let mut state = self.state.write();
        if state.closed {
            return Err(self.closed_error());
        }

        let rev = match state.docs.get(&doc.id) {
            None if !doc.rev.is_empty() => {
                return Err(SofaError::Conflict(format!(
                    "document {} does not exist, revision {} cannot match",
                    doc.id, doc.rev
                )));
            }
            None => self.revisions.next(None),
            Some(current) if current.rev != doc.rev => {
                return Err(SofaError::Conflict(format!(
                    "document {} is at a different revision than {:?}",
                    doc.id,
                    doc.rev.as_str()
                )));
            }
            Some(current) => self.revisions.next(Some(&current.rev)),
        };

        doc.rev = rev.clone();
        tracing::trace!("[{}] stored {} at {}", self.name, doc.id, rev);
        state.docs.insert(doc.id.clone(), doc);
        state.update_seq += 1;

        Ok(rev)
    }

    fn delete(&self, id: &str, rev: &Revision) -> Result<Revision> {
        let mut state = self.state.write();

        match state.docs.get(id) {
            None => return Err(SofaError::DocumentNotFound(id.to_string())),
            Some(current) if &current.rev != rev => {
                return Err(SofaError::Conflict(format!(
                    "document {} is at a different revision than {:?}",
                    id,
                    rev.as_str()
                )));
            }
            Some(_) => {}
        }

        state.docs.remove(id);
        state.doc_del_count += 1;
        state.update_seq += 1;
        tracing::trace!("[{}] deleted {} at {}", self.name, id, rev);

        Ok(rev.clone())
    }

    fn info(&self) -> Result<DbInfo> {
        let state = self.state.read();
        if state.closed {
            return Err(self.closed_error());
        }

        Ok(DbInfo {
            db_name: self.name.clone(),
            compact_running: false,
            disk_format_version: DbInfo::DISK_FORMAT_VERSION,
            disk_size: 0,
            doc_count: state.docs.len() as u64,
            doc_del_count: state.doc_del_count,
            instance_start_time: self.instance_start_time.clone(),
            purge_seq: 0,
            update_seq: state.update_seq,
        })
    }

    fn close(&self) {
        let mut state = self.state.write();
        state.closed = true;
        state.docs.clear();
    }
}
