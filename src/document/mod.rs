//! Document Module
//!
//! Data model shared by the stores, the handlers and the transport.
//!
//! ## Responsibilities
//! - Documents: caller-chosen id, current revision, JSON body
//! - Revision tokens and their generation
//! - Database info snapshots for status reporting
//!
//! ## Wire Shape
//! A fetched document is its body with `_id` and `_rev` injected:
//! ```text
//! {"_id": "doc1", "_rev": "2-9f0c…", "title": "hello", ...}
//! ```
//! Those two keys are reserved: they are stripped from incoming bodies before
//! storage, so an injected key never shadows stored data.

mod revision;

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};

pub use revision::{Revision, RevisionGenerator};

/// Body key carrying the document id on the wire
pub const ID_KEY: &str = "_id";

/// Body key carrying the document revision on the wire
pub const REV_KEY: &str = "_rev";

/// A JSON document body
pub type Body = Map<String, Value>;

/// A named binary attachment
///
/// Stored alongside the document; there is no HTTP surface for attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    /// MIME type supplied by the writer
    pub content_type: String,

    /// Raw content
    pub data: Bytes,
}

/// A versioned JSON document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Caller-supplied identifier, unique within its database
    pub id: String,

    /// Current revision (empty on a write that expects no prior document)
    pub rev: Revision,

    /// Document content without the reserved `_id`/`_rev` keys
    pub body: Body,

    /// Named attachments
    pub attachments: BTreeMap<String, Attachment>,
}

impl Document {
    /// Create a document with an empty revision
    pub fn new(id: impl Into<String>, body: Body) -> Self {
        Self {
            id: id.into(),
            rev: Revision::empty(),
            body,
            attachments: BTreeMap::new(),
        }
    }

    /// Set the revision this write asserts is current
    pub fn with_rev(mut self, rev: impl Into<Revision>) -> Self {
        self.rev = rev.into();
        self
    }

    /// Build a document from a decoded request body
    ///
    /// The body's `_rev` (when it is a string) is kept as the document's
    /// asserted revision; `_id` and `_rev` are removed from the stored body.
    pub fn from_body(id: impl Into<String>, mut body: Body) -> Self {
        let rev = match body.remove(REV_KEY) {
            Some(Value::String(rev)) => Revision::from(rev),
            _ => Revision::empty(),
        };
        body.remove(ID_KEY);

        Self {
            id: id.into(),
            rev,
            body,
            attachments: BTreeMap::new(),
        }
    }

    /// Render the document in its wire shape
    ///
    /// The injected `_id`/`_rev` always win over same-named body keys.
    pub fn to_json(&self) -> Value {
        let mut map = self.body.clone();
        map.insert(ID_KEY.to_string(), Value::String(self.id.clone()));
        map.insert(REV_KEY.to_string(), Value::String(self.rev.to_string()));
        Value::Object(map)
    }
}

/// Point-in-time description of one database
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DbInfo {
    pub db_name: String,
    pub compact_running: bool,
    pub disk_format_version: u32,
    pub disk_size: u64,
    pub doc_count: u64,
    pub doc_del_count: u64,
    /// Microseconds since the UNIX epoch; a string on the wire
    pub instance_start_time: String,
    pub purge_seq: u64,
    pub update_seq: u64,
}

impl DbInfo {
    /// On-disk format version reported to clients
    pub const DISK_FORMAT_VERSION: u32 = 6;
}
