//! Engine Module
//!
//! Front door of the server core: routes a request and runs its handler.
//!
//! ## Responsibilities
//! - Own the route table and the database registry
//! - Dispatch each request to exactly one endpoint
//! - Hand the result back as a transport-neutral [`Response`]

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::handlers;
use crate::protocol::{Request, Response};
use crate::registry::Registry;
use crate::router::RouteTable;

/// The request engine
///
/// ## Concurrency Model
///
/// - The route table is immutable after construction and shared freely
/// - The registry and each document store synchronize internally, so
///   `execute` takes `&self` and may run on any number of threads at once
pub struct Engine {
    /// Ordered route table
    routes: RouteTable,

    /// Databases served by this engine
    registry: Arc<Registry>,
}

impl Engine {
    /// Build an engine with the standard routes and a freshly seeded registry
    pub fn open(config: &Config) -> Result<Self> {
        let registry = Arc::new(Registry::with_config(config)?);
        Self::with_registry(registry)
    }

    /// Build an engine over an existing registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        Ok(Self {
            routes: RouteTable::standard()?,
            registry,
        })
    }

    /// Route a request and run its handler
    pub fn execute(&self, request: &Request) -> Response {
        let (endpoint, args) = self.routes.dispatch(&request.method, &request.path);
        tracing::debug!(
            "{} {} -> {:?} {:?}",
            request.method,
            request.path,
            endpoint,
            args
        );

        handlers::handle(&self.registry, endpoint, &args, request)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The route table
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The database registry
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}
