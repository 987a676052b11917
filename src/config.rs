//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Store configuration
    pub store: StoreConfig,
    /// Static asset and data locations
    pub assets: AssetsConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Store configuration
#[derive(Clone)]
pub struct StoreConfig {
    /// Connection string for the state store; `None` disables the API
    pub connection_string: Option<String>,
}

// Connection strings can carry credentials
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scheme = self
            .connection_string
            .as_deref()
            .map(|s| s.split(':').next().unwrap_or_default());
        f.debug_struct("StoreConfig")
            .field("scheme", &scheme)
            .finish()
    }
}

/// Static asset and data locations
#[derive(Debug, Clone)]
pub struct AssetsConfig {
    /// Directory holding yearly holiday JSON files
    pub holidays_dir: PathBuf,
    /// Directory holding the built front-end
    pub static_dir: PathBuf,
    /// Entry file served for every unmatched route
    pub entry_file: String,
}

impl AssetsConfig {
    /// Full path of the front-end entry file
    pub fn entry_path(&self) -> PathBuf {
        self.static_dir.join(&self.entry_file)
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            store: StoreConfig {
                connection_string: env::var("DATABASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
            },
            assets: AssetsConfig {
                holidays_dir: env::var("HOLIDAYS_DIR")
                    .unwrap_or_else(|_| "data/holidays".to_string())
                    .into(),
                static_dir: env::var("STATIC_DIR")
                    .unwrap_or_else(|_| "public".to_string())
                    .into(),
                entry_file: env::var("STATIC_ENTRY").unwrap_or_else(|_| "index.html".to_string()),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
