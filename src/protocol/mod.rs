//! Protocol Module
//!
//! Request and response shapes exchanged between transport and handlers.
//!
//! ## Response Envelopes
//! ```text
//! write           {"ok": true, "id": "<docid>", "rev": "<rev>"}
//! delete          {"ok": true, "rev": "<rev>"}
//! database op     {"ok": true}
//! error           {"error": "<code>", "reason": "<text>"}
//! document        {"_id": …, "_rev": …, <body fields>}
//! ```
//!
//! ## Status Codes
//! - 200: read, document write, delete
//! - 201: database created
//! - 400: malformed request, illegal name, decode failure, missing database,
//!   revision conflict
//! - 404: missing document or database info, unsupported route
//! - 412: database exists on create, missing on delete
//! - 500: response encoding failure

mod request;
mod response;

pub use request::Request;
pub use response::{ErrorCode, Response};
