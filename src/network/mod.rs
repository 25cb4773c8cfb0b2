//! Network Module
//!
//! HTTP transport for the engine.
//!
//! ## Architecture
//! - tokio runtime, axum/hyper for HTTP/1.1
//! - A single fallback handler turns each request into a `protocol::Request`
//! - The engine does all routing and answers synchronously

mod service;
mod server;

pub use service::router;
pub use server::Server;
