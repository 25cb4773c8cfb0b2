//! Endpoint handlers
//!
//! One function per [`Endpoint`]. Each takes the captured path segments
//! (`args[0]` = database name, `args[1]` = document id) and answers with a
//! [`Response`]; failures become error envelopes, never panics.

use serde_json::json;

use crate::document::Document;
use crate::error::SofaError;
use crate::protocol::{ErrorCode, Request, Response};
use crate::registry::Registry;
use crate::router::Endpoint;

/// Run the handler bound to `endpoint`
pub fn handle(registry: &Registry, endpoint: Endpoint, args: &[String], request: &Request) -> Response {
    match endpoint {
        Endpoint::ServerInfo => server_info(),
        Endpoint::AllDbs => all_dbs(registry),
        Endpoint::Reserved => reserved(args),
        Endpoint::DbInfo => db_info(registry, args),
        Endpoint::DbExists => db_exists(registry, args),
        Endpoint::CreateDb => create_db(registry, args),
        Endpoint::DeleteDb => delete_db(registry, args),
        Endpoint::DbChanges => db_changes(),
        Endpoint::PutDocument => put_document(registry, args, request),
        Endpoint::GetDocument => get_document(registry, args),
        Endpoint::DeleteDocument => delete_document(registry, args, request),
        Endpoint::Unhandled => unhandled(request),
    }
}

fn arg(args: &[String], index: usize) -> &str {
    args.get(index).map(String::as_str).unwrap_or("")
}

// =============================================================================
// Server
// =============================================================================

fn server_info() -> Response {
    Response::ok(json!({ "couchdb": "Welcome", "version": crate::VERSION }))
}

fn all_dbs(registry: &Registry) -> Response {
    Response::ok(json!(registry.list()))
}

fn reserved(args: &[String]) -> Response {
    let err = SofaError::InvalidName(format!("_{}", arg(args, 0)));
    tracing::debug!("{}", err);
    Response::from_error(&err)
}

fn unhandled(request: &Request) -> Response {
    tracing::warn!("No handler for {} {:?}", request.method, request.path);
    Response::error(
        400,
        ErrorCode::NoHandler,
        format!("Can't handle {} to {}", request.method, request.path),
    )
}

// =============================================================================
// Databases
// =============================================================================

fn db_info(registry: &Registry, args: &[String]) -> Response {
    let info = registry.get(arg(args, 0)).and_then(|store| store.info());
    match info {
        Ok(info) => Response::serialized(200, &info),
        Err(e) if e.is_not_found() => Response::error(404, ErrorCode::NotFound, "no_db_file"),
        Err(e) => Response::from_error(&e),
    }
}

fn db_exists(registry: &Registry, args: &[String]) -> Response {
    if registry.contains(arg(args, 0)) {
        Response::empty(200)
    } else {
        Response::empty(404)
    }
}

fn create_db(registry: &Registry, args: &[String]) -> Response {
    match registry.create(arg(args, 0)) {
        Ok(()) => Response::json(201, json!({ "ok": true })),
        Err(e) => Response::error(412, ErrorCode::FileExists, e.to_string()),
    }
}

fn delete_db(registry: &Registry, args: &[String]) -> Response {
    match registry.destroy(arg(args, 0)) {
        Ok(()) => Response::ok(json!({ "ok": true })),
        Err(e) => Response::error(412, ErrorCode::NotFound, e.to_string()),
    }
}

fn db_changes() -> Response {
    Response::from_error(&SofaError::Unimplemented(
        "Not supporting changes yet.".to_string(),
    ))
}

// =============================================================================
// Documents
// =============================================================================

fn put_document(registry: &Registry, args: &[String], request: &Request) -> Response {
    let (db_name, doc_id) = (arg(args, 0), arg(args, 1));

    let body = match request.json_body() {
        Ok(body) => body,
        Err(e) => return Response::from_error(&e),
    };

    // Revision precedence: query/If-Match, then the body's `_rev`, then empty
    let mut doc = Document::from_body(doc_id, body);
    if let Some(rev) = request.revision_hint() {
        doc.rev = rev;
    }

    let result = registry
        .get(db_name)
        .and_then(|store| store.create_or_update(doc));

    match result {
        Ok(rev) => Response::ok(json!({ "ok": true, "id": doc_id, "rev": rev })),
        Err(e) => Response::from_error(&e),
    }
}

fn get_document(registry: &Registry, args: &[String]) -> Response {
    let (db_name, doc_id) = (arg(args, 0), arg(args, 1));

    match registry.get(db_name).and_then(|store| store.get(doc_id)) {
        Ok(doc) => Response::ok(doc.to_json()),
        Err(e) => Response::from_error(&e),
    }
}

fn delete_document(registry: &Registry, args: &[String], request: &Request) -> Response {
    let (db_name, doc_id) = (arg(args, 0), arg(args, 1));
    let rev = request.revision_hint().unwrap_or_default();

    match registry
        .get(db_name)
        .and_then(|store| store.delete(doc_id, &rev))
    {
        Ok(rev) => Response::ok(json!({ "ok": true, "rev": rev })),
        Err(e) => Response::from_error(&e),
    }
}
