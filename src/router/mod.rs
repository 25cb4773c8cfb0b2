//! Router Module
//!
//! Maps an HTTP method and path to an endpoint plus captured path segments.
//!
//! ## Standard Routes (in priority order)
//! ```text
//! GET    /                 ServerInfo
//! GET    /_all_dbs         AllDbs
//! GET    /_{rest}          Reserved         [rest]
//! GET    /{db}[/]          DbInfo           [db]
//! GET    /{db}/_changes    DbChanges        [db]
//! HEAD   /{db}[/]          DbExists         [db]
//! PUT    /_{rest}          Reserved         [rest]
//! PUT    /{db}[/]          CreateDb         [db]
//! DELETE /_{rest}          Reserved         [rest]
//! DELETE /{db}[/]          DeleteDb         [db]
//! GET    /{db}/{docid}     GetDocument      [db, docid]
//! PUT    /{db}/{docid}     PutDocument      [db, docid]
//! DELETE /{db}/{docid}     DeleteDocument   [db, docid]
//! ```
//!
//! Anything else dispatches to `Unhandled` with no arguments.

mod route;
mod table;

pub use route::{Endpoint, Method, Route};
pub use table::RouteTable;

/// Database names: lowercase letters, digits and `_$()+-`, no leading `_`
pub const DB_NAME: &str = r"[a-z0-9$()+\-][a-z0-9_$()+\-]*";

/// Document ids: one or more characters other than `/`
pub const DOC_ID: &str = r"[^/]+";
