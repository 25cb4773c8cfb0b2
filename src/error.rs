//! Error types for SofaDB
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SofaError
pub type Result<T> = std::result::Result<T, SofaError>;

/// Unified error type for SofaDB operations
#[derive(Debug, Error)]
pub enum SofaError {
    // -------------------------------------------------------------------------
    // Registry Errors
    // -------------------------------------------------------------------------
    #[error("Database does not exist: {0}")]
    DatabaseNotFound(String),

    #[error("Database already exists: {0}")]
    DatabaseExists(String),

    #[error(
        "Illegal database name {0:?}: only lowercase characters (a-z), digits (0-9), \
         and any of the characters _, $, (, ), +, and - are allowed. \
         Must not begin with an underscore."
    )]
    InvalidName(String),

    // -------------------------------------------------------------------------
    // Document Errors
    // -------------------------------------------------------------------------
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Document update conflict: {0}")]
    Conflict(String),

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("Error decoding request body: {0}")]
    Decode(String),

    #[error("Not implemented: {0}")]
    Unimplemented(String),

    // -------------------------------------------------------------------------
    // Routing Errors
    // -------------------------------------------------------------------------
    #[error("Invalid route pattern: {0}")]
    Route(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SofaError {
    /// True for the "something is absent" family (database or document)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SofaError::DatabaseNotFound(_) | SofaError::DocumentNotFound(_)
        )
    }
}

impl From<regex::Error> for SofaError {
    fn from(e: regex::Error) -> Self {
        SofaError::Route(e.to_string())
    }
}
