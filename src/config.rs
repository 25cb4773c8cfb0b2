//! Configuration for SofaDB
//!
//! Centralized configuration with sensible defaults.

use crate::store::StorageBackend;

/// Main configuration for a SofaDB server instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,

    /// Largest request body accepted by the transport (in bytes)
    pub max_body_bytes: usize,

    // -------------------------------------------------------------------------
    // Registry Configuration
    // -------------------------------------------------------------------------
    /// Databases created when the registry is built
    pub initial_databases: Vec<String>,

    /// Storage variant used for newly created databases
    pub backend: StorageBackend,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:4984".to_string(),
            max_body_bytes: 16 * 1024 * 1024, // 16 MB
            initial_databases: vec!["default".to_string()],
            backend: StorageBackend::Memory,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the maximum request body size (in bytes)
    pub fn max_body_bytes(mut self, size: usize) -> Self {
        self.config.max_body_bytes = size;
        self
    }

    /// Replace the set of databases seeded at startup
    pub fn initial_databases<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.initial_databases = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the storage backend for new databases
    pub fn backend(mut self, backend: StorageBackend) -> Self {
        self.config.backend = backend;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
