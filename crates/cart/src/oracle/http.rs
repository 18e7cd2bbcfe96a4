//! HTTP stock oracle client.
//!
//! Uses `reqwest` for HTTP. Catalog entries are cached with `moka`; stock is
//! always fetched live because it is the value being validated.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rocket_cart_core::{CatalogEntry, ProductId, StockInfo};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{OracleError, StockOracle};
use crate::config::CartConfig;

/// Client for the stock oracle HTTP API.
#[derive(Clone)]
pub struct HttpStockOracle {
    inner: Arc<HttpStockOracleInner>,
}

struct HttpStockOracleInner {
    client: reqwest::Client,
    base_url: Url,
    catalog: Option<Cache<ProductId, CatalogEntry>>,
}

impl HttpStockOracle {
    /// Create a client for the oracle at `base_url`.
    ///
    /// A zero `catalog_ttl` disables catalog caching.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: &Url, catalog_ttl: Duration) -> Result<Self, OracleError> {
        let catalog = (!catalog_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(catalog_ttl)
                .build()
        });

        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(HttpStockOracleInner {
                client,
                base_url: directory_url(base_url),
                catalog,
            }),
        })
    }

    /// Create a client from cart configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &CartConfig) -> Result<Self, OracleError> {
        Self::new(&config.api_base_url, config.catalog_cache_ttl)
    }

    /// GET a JSON document relative to the base URL. `404` yields `None`.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, OracleError> {
        let url = self.inner.base_url.join(path)?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(path, "Oracle has no record");
            return Ok(None);
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Stock oracle returned non-success status"
            );
            return Err(OracleError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse stock oracle response"
                );
                Err(OracleError::Parse(e))
            }
        }
    }
}

impl StockOracle for HttpStockOracle {
    #[instrument(skip_all, fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> Result<Option<StockInfo>, OracleError> {
        let stock: Option<StockInfo> = self.get_json(&format!("stock/{id}")).await?;
        if let Some(stock) = &stock {
            ensure_same_product(id, stock.id)?;
            debug!(available = stock.amount, "Fetched stock");
        }
        Ok(stock)
    }

    #[instrument(skip_all, fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Option<CatalogEntry>, OracleError> {
        if let Some(cache) = &self.inner.catalog
            && let Some(entry) = cache.get(&id).await
        {
            debug!("Cache hit for catalog entry");
            return Ok(Some(entry));
        }

        let entry: Option<CatalogEntry> = self.get_json(&format!("products/{id}")).await?;

        if let Some(entry) = &entry {
            ensure_same_product(id, entry.id)?;
            if let Some(cache) = &self.inner.catalog {
                cache.insert(id, entry.clone()).await;
            }
        }

        Ok(entry)
    }
}

fn ensure_same_product(requested: ProductId, returned: ProductId) -> Result<(), OracleError> {
    if requested == returned {
        Ok(())
    } else {
        Err(OracleError::Mismatch {
            requested,
            returned,
        })
    }
}

/// Ensure the base URL path ends with `/` so relative joins append to it.
fn directory_url(base_url: &Url) -> Url {
    let mut url = base_url.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
