//! HTTP Server
//!
//! Binds the listener and serves the engine until shutdown.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::Result;

use super::service::router;

/// HTTP server for SofaDB
pub struct Server {
    /// Server configuration
    config: Config,

    /// Shared request engine
    engine: Arc<Engine>,
}

impl Server {
    /// Create a new server with the given config and engine
    pub fn new(config: Config, engine: Arc<Engine>) -> Self {
        Self { config, engine }
    }

    /// Bind the configured address and serve until Ctrl+C
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("Listening for HTTP requests on {}", listener.local_addr()?);

        let app = router(self.engine, self.config.max_body_bytes);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped accepting connections");
        Ok(())
    }

    /// The engine this server dispatches to
    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, initiating shutdown..."),
        Err(e) => tracing::warn!("Unable to listen for Ctrl+C: {}", e),
    }
}
