//! HTTP adapter
//!
//! Converts between axum requests/responses and the engine's protocol types.
//! Every request goes through one fallback handler, so routing decisions stay
//! with the engine's route table rather than axum's router.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use bytes::Bytes;

use crate::engine::Engine;
use crate::protocol::{Request, Response};

/// Build the axum application serving `engine`
pub fn router(engine: Arc<Engine>, max_body_bytes: usize) -> Router {
    Router::new()
        .fallback(handle_request)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(engine)
}

async fn handle_request(
    State(engine): State<Arc<Engine>>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    let request = Request {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query,
        if_match: headers
            .get(header::IF_MATCH)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body,
    };

    let response = engine.execute(&request);
    tracing::trace!("{} {} -> {}", request.method, request.path, response.status);

    into_http(response, method == Method::HEAD)
}

/// Write a protocol response as an HTTP response (HEAD never carries a body)
fn into_http(response: Response, head_only: bool) -> axum::response::Response {
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match response.body {
        Some(body) if !head_only => (status, Json(body)).into_response(),
        _ => status.into_response(),
    }
}
