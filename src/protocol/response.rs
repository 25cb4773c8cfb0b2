//! Response definitions
//!
//! Status code plus JSON envelope handed back to the transport.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::SofaError;

/// Short error codes carried in `{"error": …}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotFound,
    FileExists,
    IllegalDatabaseName,
    NoHandler,
    Decode,
    NoDb,
    Generic,
    NotImplemented,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "not_found",
            ErrorCode::FileExists => "file_exists",
            ErrorCode::IllegalDatabaseName => "illegal_database_name",
            ErrorCode::NoHandler => "no_handler",
            ErrorCode::Decode => "decode",
            ErrorCode::NoDb => "no_db",
            ErrorCode::Generic => "generic",
            ErrorCode::NotImplemented => "not_implemented",
            ErrorCode::Internal => "internal",
        }
    }
}

/// A response to send to the client
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// JSON body (None for bodiless responses such as HEAD)
    pub body: Option<Value>,
}

impl Response {
    /// 200 with a JSON body
    pub fn ok(body: Value) -> Self {
        Self::json(200, body)
    }

    /// Arbitrary status with a JSON body
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// Status line only
    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Serialize `value` as the body
    ///
    /// A value that cannot be serialized fails this request with a 500; it
    /// never takes the server down.
    pub fn serialized<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self::json(status, body),
            Err(e) => {
                tracing::error!("Failed to serialize response body: {}", e);
                Self::from_error(&SofaError::Serialization(e.to_string()))
            }
        }
    }

    /// `{"error": code, "reason": reason}`
    pub fn error(status: u16, code: ErrorCode, reason: impl Into<String>) -> Self {
        Self::json(
            status,
            json!({ "error": code.as_str(), "reason": reason.into() }),
        )
    }

    /// Default translation of an error to status and envelope
    pub fn from_error(err: &SofaError) -> Self {
        let (status, code) = match err {
            SofaError::DatabaseNotFound(_) => (400, ErrorCode::NoDb),
            SofaError::DatabaseExists(_) => (412, ErrorCode::FileExists),
            SofaError::InvalidName(_) => (400, ErrorCode::IllegalDatabaseName),
            SofaError::DocumentNotFound(_) => (404, ErrorCode::NotFound),
            SofaError::Conflict(_) => (400, ErrorCode::Generic),
            SofaError::Decode(_) => (400, ErrorCode::Decode),
            SofaError::Unimplemented(_) => (404, ErrorCode::NotImplemented),
            SofaError::Serialization(_) => (500, ErrorCode::Internal),
            SofaError::Route(_) | SofaError::Io(_) => (500, ErrorCode::Generic),
        };
        Self::error(status, code, err.to_string())
    }

    /// Value of `body["error"]`, if this is an error envelope
    pub fn error_code(&self) -> Option<&str> {
        self.body.as_ref()?.get("error")?.as_str()
    }
}
