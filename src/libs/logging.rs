//! `tracing` subscriber setup.
//!
//! `RUST_LOG` always wins; otherwise the configured directive (or
//! [`DEFAULT_FILTER`]) is used.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "todo_site=info";

/// Builds the filter from `RUST_LOG`, then `configured`, then the default.
pub fn env_filter(configured: Option<&str>) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(configured.unwrap_or(DEFAULT_FILTER)).map_err(|e| anyhow!("invalid log filter: {}", e))
}

/// Installs the global fmt subscriber. Fails if one is already installed.
pub fn init(configured: Option<&str>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(configured)?)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_directive() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        assert!(env_filter(Some("todo_site=notalevel")).is_err());
        assert!(env_filter(Some("todo_site=debug")).is_ok());
    }
}
