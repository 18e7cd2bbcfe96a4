//! Stock oracle: the read-only source of stock levels and catalog data.
//!
//! The cart store only depends on the [`StockOracle`] trait. The HTTP
//! implementation talks to an API exposing:
//!
//! ```text
//! GET /stock/{id}     -> {"id": 1, "amount": 5}
//! GET /products/{id}  -> {"id": 1, "title": "...", "price": 179.9, "image": "..."}
//! ```
//!
//! A `404` on either endpoint means "no record" and is reported as `Ok(None)`.

mod http;

pub use http::HttpStockOracle;

use std::future::Future;

use rocket_cart_core::{CatalogEntry, ProductId, StockInfo};
use thiserror::Error;

/// Errors that can occur when querying the stock oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status other than 404.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The record returned belongs to a different product.
    #[error("Requested product {requested} but oracle returned {returned}")]
    Mismatch {
        requested: ProductId,
        returned: ProductId,
    },

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Read-only, side-effect free access to stock and catalog data.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait StockOracle: Send + Sync {
    /// Current stock for a product, `None` if the oracle has no record.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle could not be queried.
    fn stock(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<StockInfo>, OracleError>> + Send;

    /// Catalog metadata for a product, `None` if the oracle has no record.
    ///
    /// # Errors
    ///
    /// Returns an error if the oracle could not be queried.
    fn product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<CatalogEntry>, OracleError>> + Send;
}
