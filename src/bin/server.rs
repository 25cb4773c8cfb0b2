//! SofaDB Server Binary
//!
//! Starts the HTTP server for SofaDB.

use std::sync::Arc;

use clap::Parser;
use sofadb::network::Server;
use sofadb::{Config, Engine};

/// Database every server starts with
const DEFAULT_DATABASE: &str = "default";
use tracing_subscriber::{fmt, EnvFilter};

/// SofaDB Server
#[derive(Parser, Debug)]
#[command(name = "sofadb-server")]
#[command(about = "Minimal document database with a CouchDB-style HTTP API")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:4984")]
    listen: String,

    /// Extra database to create at startup, besides `default` (repeatable)
    #[arg(short, long = "db")]
    databases: Vec<String>,

    /// Maximum request body size in MB
    #[arg(short = 'm', long, default_value = "16")]
    max_body_mb: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sofadb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    let config = config_from_args(args);

    tracing::info!("SofaDB Server v{}", sofadb::VERSION);
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Initial databases: {:?}", config.initial_databases);

    let engine = match Engine::open(&config) {
        Ok(e) => Arc::new(e),
        Err(e) => {
            tracing::error!("Failed to start engine: {}", e);
            std::process::exit(1);
        }
    };

    let server = Server::new(config, engine);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}

/// Build the server config from parsed flags
///
/// `default` is always seeded first; `--db` names are added once each.
fn config_from_args(args: Args) -> Config {
    let mut databases = vec![DEFAULT_DATABASE.to_string()];
    for name in args.databases {
        if !databases.contains(&name) {
            databases.push(name);
        }
    }

    Config::builder()
        .listen_addr(&args.listen)
        .initial_databases(databases)
        .max_body_bytes(args.max_body_mb.saturating_mul(1024 * 1024))
        .build()
}
