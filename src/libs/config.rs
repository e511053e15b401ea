//! Application configuration management.
//!
//! Configuration is a small JSON document stored next to the database in the
//! platform data directory (see [`DataStorage`]). It is layered:
//!
//! 1. **Defaults**: `127.0.0.1:8000`, database `todo_site.db` in the data directory
//! 2. **File**: `config.json`, if present
//! 3. **Environment**: `TODO_SITE_HOST`, `TODO_SITE_PORT`, `TODO_SITE_DB`,
//!    `TODO_SITE_LOG` (a `.env` file is honoured through `dotenv`)
//! 4. **Command line**: `serve --host/--port/--db` flags, applied by the command
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todo_site::libs::config::Config;
//!
//! let config = Config::read()?.with_env_overrides()?;
//! println!("{}", config.server.address());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Name of the configuration file within the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_HOST: &str = "TODO_SITE_HOST";
pub const ENV_PORT: &str = "TODO_SITE_PORT";
pub const ENV_DB: &str = "TODO_SITE_DB";
pub const ENV_LOG: &str = "TODO_SITE_LOG";

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind. Defaults to loopback only.
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Explicit database file. When absent the file lives in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// `tracing` filter directive used when `RUST_LOG` is not set, e.g. `"todo_site=debug"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    /// Reads `config.json` from the data directory.
    ///
    /// A missing file is not an error: the default configuration is returned so
    /// the server can start with zero setup.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads a configuration file at an explicit location.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str).map_err(|e| msg_error_anyhow!(Message::ConfigParseError(e.to_string())))?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON into the data directory.
    ///
    /// Returns the path written.
    pub fn save(&self) -> Result<PathBuf> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)?;
        Ok(config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes `config.json` from the data directory.
    ///
    /// Returns the removed path, or `None` when there was nothing to remove.
    pub fn delete() -> Result<Option<PathBuf>> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(None);
        }
        fs::remove_file(&config_file_path)?;
        Ok(Some(config_file_path))
    }

    /// Applies `TODO_SITE_*` overrides from the process environment (and `.env`).
    pub fn with_env_overrides(mut self) -> Result<Self> {
        dotenv::dotenv().ok();
        self.apply_env(|key| std::env::var(key).ok())?;
        Ok(self)
    }

    /// Applies overrides from an arbitrary lookup; empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = parse_port(&port)?;
        }
        if let Some(path) = lookup(ENV_DB) {
            self.database.path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.log_level = Some(level);
        }
        Ok(())
    }

    /// Resolves the database file, falling back to the data directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }
}

/// Parses a TCP port, rejecting `0` and anything outside `u16`.
pub fn parse_port(value: &str) -> Result<u16> {
    match value.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(msg_error_anyhow!(Message::ConfigInvalidPort(value.to_string()))),
    }
}
