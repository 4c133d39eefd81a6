use std::sync::Arc;

use crate::config::ServerConfig;
use crate::generation::TextGenerator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: jobtrail_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Text-generation capability, `None` when no API key is configured.
    pub generator: Option<Arc<dyn TextGenerator>>,
    /// AES-256 key for the OAuth credential store, derived once at startup.
    pub encryption_key: [u8; 32],
}

impl AppState {
    /// Assemble shared state from configuration and a live pool.
    pub fn new(
        pool: jobtrail_db::DbPool,
        config: ServerConfig,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        let encryption_key = jobtrail_core::crypto::derive_key(&config.encryption_secret);
        Self {
            pool,
            config: Arc::new(config),
            generator,
            encryption_key,
        }
    }
}
