//! Catalog and stock records as served by the stock oracle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;

/// Catalog metadata for a product.
///
/// Fields the cart does not interpret are kept in `extra` so they survive
/// a trip through the persisted snapshot unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    /// Create a catalog entry with no extra fields.
    #[must_use]
    pub fn new(id: ProductId, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: String::new(),
            extra: Map::new(),
        }
    }
}

/// Units of a product currently available.
///
/// Fetched on demand for every validation and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    pub id: ProductId,
    pub amount: u32,
}

impl StockInfo {
    /// Whether the stock covers `requested` units in total.
    #[must_use]
    pub fn covers(&self, requested: u64) -> bool {
        requested <= u64::from(self.amount)
    }
}
