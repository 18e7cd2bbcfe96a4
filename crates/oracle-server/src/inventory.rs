//! In-memory inventory loaded from a JSON database file.
//!
//! The file has the shape:
//!
//! ```json
//! {
//!   "products": [{"id": 1, "title": "...", "price": 179.9, "image": "..."}],
//!   "stock": [{"id": 1, "amount": 3}]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use rocket_cart_core::{CatalogEntry, ProductId, StockInfo};
use serde::Deserialize;
use thiserror::Error;

/// Errors loading the inventory file.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Failed to read inventory file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse inventory file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate {table} record for product {id}")]
    Duplicate { table: &'static str, id: ProductId },
}

#[derive(Deserialize)]
struct InventoryFile {
    #[serde(default)]
    products: Vec<CatalogEntry>,
    #[serde(default)]
    stock: Vec<StockInfo>,
}

/// Catalog and stock tables, read-only once loaded.
#[derive(Debug, Default)]
pub struct Inventory {
    products: Vec<CatalogEntry>,
    product_index: HashMap<ProductId, usize>,
    stock: HashMap<ProductId, StockInfo>,
}

impl Inventory {
    /// Load the inventory from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a table
    /// lists the same product twice.
    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse the inventory from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or has duplicate ids.
    pub fn from_json(json: &str) -> Result<Self, InventoryError> {
        let file: InventoryFile = serde_json::from_str(json)?;

        let mut product_index = HashMap::with_capacity(file.products.len());
        for (position, product) in file.products.iter().enumerate() {
            if product_index.insert(product.id, position).is_some() {
                return Err(InventoryError::Duplicate {
                    table: "products",
                    id: product.id,
                });
            }
        }

        let mut stock = HashMap::with_capacity(file.stock.len());
        for record in file.stock {
            if stock.insert(record.id, record).is_some() {
                return Err(InventoryError::Duplicate {
                    table: "stock",
                    id: record.id,
                });
            }
        }

        Ok(Self {
            products: file.products,
            product_index,
            stock,
        })
    }

    /// All catalog entries in file order.
    #[must_use]
    pub fn products(&self) -> &[CatalogEntry] {
        &self.products
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&CatalogEntry> {
        self.product_index
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }

    #[must_use]
    pub fn stock(&self, id: ProductId) -> Option<StockInfo> {
        self.stock.get(&id).copied()
    }
}
