//! Server configuration loading from config.toml and the environment.
//!
//! The TOML file is optional. Values are resolved in order: built-in defaults,
//! then the file, then `DATABASE_URL` / `HOST` / `PORT` from the environment
//! (which may itself have been populated from `.env`).

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "PARKING_LEDGER_CONFIG";

/// Runtime settings for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to listen on
    pub port: u16,
    /// `SeaORM` connection URL for the ledger store
    pub database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Applies `DATABASE_URL`, `HOST` and `PORT` overrides from the environment.
    ///
    /// # Errors
    /// Returns an error if `PORT` is set but is not a valid port number.
    pub fn apply_env_overrides(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database_url = url;
        }
        if let Ok(host) = std::env::var("HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.port = port.parse().map_err(|e| Error::Config {
                message: format!("Invalid PORT value {port:?}: {e}"),
            })?;
        }
        Ok(self)
    }
}

/// Loads server configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServerConfig> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {path_ref:?}: {e}"),
    })
}

/// Resolves the effective configuration for this process.
///
/// Reads the file named by `PARKING_LEDGER_CONFIG` (default `config.toml`) when it
/// exists, falls back to defaults otherwise, then applies environment overrides.
pub fn load_server_config() -> Result<ServerConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
    let base = if Path::new(&path).exists() {
        load_config(&path)?
    } else {
        info!("No config file at {}, using defaults", path);
        ServerConfig::default()
    };
    base.apply_env_overrides()
}
