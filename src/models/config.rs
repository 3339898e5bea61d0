use std::collections::HashMap;

use serde::Deserialize;

/// Configuration options of the catalog service.
///
/// Loaded from `config/default.yaml`, an optional `config/{APP_ENV}.yaml`
/// overlay and `APP_*` environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Path to the SQLite database file.
    pub database_url: String,
    /// Maximum number of pooled SQLite connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Message templates overriding the built-in English catalog, keyed by
    /// message key (for example `error.entity.notfound`).
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

fn default_pool_size() -> u32 {
    8
}
