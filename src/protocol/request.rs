//! Request definitions
//!
//! Transport-neutral view of an incoming HTTP request.

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::Value;

use crate::document::{Body, Revision};
use crate::error::{Result, SofaError};

/// An incoming request
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// HTTP method name, e.g. `"PUT"`
    pub method: String,

    /// Raw (still percent-encoded) request path; the route table decodes
    /// the segments it captures
    pub path: String,

    /// Decoded query parameters
    pub query: HashMap<String, String>,

    /// Value of the `If-Match` header
    pub if_match: Option<String>,

    /// Request body
    pub body: Bytes,
}

impl Request {
    /// Create a request with no query, headers or body
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_if_match(mut self, value: impl Into<String>) -> Self {
        self.if_match = Some(value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Value of query parameter `key`
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Revision the caller asserts from outside the body
    ///
    /// The `rev` query parameter wins over `If-Match`; the header's
    /// surrounding quotes are dropped. Empty values count as absent.
    pub fn revision_hint(&self) -> Option<Revision> {
        if let Some(rev) = self.query_param("rev").filter(|r| !r.is_empty()) {
            return Some(Revision::from(rev));
        }

        let raw = self.if_match.as_deref()?.trim();
        let rev = raw
            .strip_prefix('"')
            .and_then(|r| r.strip_suffix('"'))
            .unwrap_or(raw);

        (!rev.is_empty()).then(|| Revision::from(rev))
    }

    /// Decode the body as a JSON object
    pub fn json_body(&self) -> Result<Body> {
        match serde_json::from_slice::<Value>(&self.body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(SofaError::Decode(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(SofaError::Decode(e.to_string())),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
