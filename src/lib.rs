//! # SofaDB
//!
//! A minimal document database speaking a CouchDB-style HTTP API:
//! - Named databases holding JSON documents
//! - Opaque revision tokens with optimistic concurrency control
//! - Ordered, first-match-wins route table
//! - In-memory storage behind a pluggable store trait
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    HTTP Server (axum)                        │
//! │                   (Multiple Clients)                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ protocol::Request
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Engine                                │
//! │           RouteTable::dispatch → handlers::handle            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │   Registry    │  name → store (RwLock)
//!               └───────┬───────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │ DocumentStore │  id → document (RwLock)
//!               │ (MemoryStore) │  revision check-and-set
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod document;
pub mod store;
pub mod registry;
pub mod router;
pub mod protocol;
pub mod handlers;
pub mod network;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SofaError, Result};
pub use config::Config;
pub use document::{Document, Revision};
pub use engine::Engine;
pub use registry::Registry;
pub use router::{Endpoint, RouteTable};
pub use store::{DocumentStore, MemoryStore, StorageBackend};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SofaDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
