//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `CART_API_BASE_URL` - Stock oracle base URL (default: `http://localhost:3333`)
//! - `CART_STORAGE_PATH` - Local storage file (default: `.rocket-cart/storage.json`)
//! - `CART_STORAGE_KEY` - Key the cart snapshot is stored under (default: `@RocketShoes:cart`)
//! - `CART_CATALOG_CACHE_TTL_SECS` - Catalog cache lifetime in seconds (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::store::DEFAULT_STORAGE_KEY;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_PATH: &str = ".rocket-cart/storage.json";
const DEFAULT_CATALOG_CACHE_TTL_SECS: &str = "300";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart store configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Base URL of the stock oracle (`/stock/{id}` and `/products/{id}`)
    pub api_base_url: Url,
    /// File backing the local key/value storage
    pub storage_path: PathBuf,
    /// Storage key holding the cart snapshot
    pub storage_key: String,
    /// How long catalog entries stay cached. Stock is never cached.
    pub catalog_cache_ttl: Duration,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url =
            get_or_default(&lookup, "CART_API_BASE_URL", DEFAULT_API_BASE_URL);
        let api_base_url = Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("CART_API_BASE_URL".to_string(), e.to_string())
        })?;
        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "CART_API_BASE_URL".to_string(),
                format!("unsupported scheme '{}'", api_base_url.scheme()),
            ));
        }

        let storage_path =
            PathBuf::from(get_or_default(&lookup, "CART_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        let storage_key = get_or_default(&lookup, "CART_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let catalog_cache_ttl = get_or_default(
            &lookup,
            "CART_CATALOG_CACHE_TTL_SECS",
            DEFAULT_CATALOG_CACHE_TTL_SECS,
        )
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| {
            ConfigError::InvalidEnvVar("CART_CATALOG_CACHE_TTL_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            storage_path,
            storage_key,
            catalog_cache_ttl,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.api_base_url.as_str(), "http://localhost:3333/");
        assert_eq!(config.storage_path, PathBuf::from(".rocket-cart/storage.json"));
        assert_eq!(config.storage_key, "@RocketShoes:cart");
        assert_eq!(config.catalog_cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("CART_API_BASE_URL", "https://shoes.example.com/api"),
            ("CART_STORAGE_PATH", "/tmp/cart.json"),
            ("CART_STORAGE_KEY", "cart"),
            ("CART_CATALOG_CACHE_TTL_SECS", "0"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url.host_str(), Some("shoes.example.com"));
        assert_eq!(config.storage_path, PathBuf::from("/tmp/cart.json"));
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.catalog_cache_ttl, Duration::ZERO);
    }

    #[test]
    fn test_invalid_base_url() {
        let err = CartConfig::from_lookup(lookup_from(&[("CART_API_BASE_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CART_API_BASE_URL"));

        let err = CartConfig::from_lookup(lookup_from(&[("CART_API_BASE_URL", "ftp://x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_invalid_ttl_and_key() {
        let err = CartConfig::from_lookup(lookup_from(&[("CART_CATALOG_CACHE_TTL_SECS", "-1")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CART_CATALOG_CACHE_TTL_SECS"));

        let err =
            CartConfig::from_lookup(lookup_from(&[("CART_STORAGE_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CART_STORAGE_KEY"));
    }
}
