//! Oracle server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ORACLE_HOST` - Bind address (default: 127.0.0.1)
//! - `ORACLE_PORT` - Listen port (default: 3333)
//! - `ORACLE_DB_PATH` - Inventory JSON file (default: `crates/oracle-server/db.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Oracle server configuration.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// JSON file holding `products` and `stock`
    pub db_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl OracleConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("ORACLE_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ORACLE_HOST".to_string(), e.to_string()))?;
        let port = lookup("ORACLE_PORT")
            .unwrap_or_else(|| "3333".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ORACLE_PORT".to_string(), e.to_string()))?;
        let db_path = PathBuf::from(
            lookup("ORACLE_DB_PATH").unwrap_or_else(|| "crates/oracle-server/db.json".to_string()),
        );

        Ok(Self {
            host,
            port,
            db_path,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OracleConfig::from_lookup(|_| None).unwrap();

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3333);
        assert_eq!(config.db_path, PathBuf::from("crates/oracle-server/db.json"));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = OracleConfig::from_lookup(|key| {
            (key == "ORACLE_PORT").then(|| "not-a-port".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "ORACLE_PORT"));
    }

    #[test]
    fn test_empty_sentry_dsn_is_disabled() {
        let config =
            OracleConfig::from_lookup(|key| (key == "SENTRY_DSN").then(String::new)).unwrap();
        assert!(config.sentry_dsn.is_none());
    }
}
