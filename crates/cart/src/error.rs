//! Cart operation errors.
//!
//! Every variant carries enough context for logs, and maps to one short
//! message for the shopper via [`CartError::user_message`].

use std::fmt;

use rocket_cart_core::ProductId;
use thiserror::Error;

use crate::oracle::OracleError;
use crate::storage::StorageError;

/// The cart operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add product",
            Self::Remove => "remove product",
            Self::UpdateAmount => "update product amount",
        })
    }
}

/// Unexpected failure underneath a cart operation.
#[derive(Debug, Error)]
pub enum OperationFailure {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Why a cart operation was rejected. The cart is unchanged in every case.
#[derive(Debug, Error)]
pub enum CartError {
    /// The oracle has no stock record for the product.
    #[error("No stock record for product {0}")]
    StockLookup(ProductId),

    /// The oracle has no catalog entry for the product.
    #[error("No catalog entry for product {0}")]
    ProductLookup(ProductId),

    /// The requested total exceeds available stock.
    #[error("Product {product_id} out of stock: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },

    /// The product to remove is not in the cart.
    #[error("Product {0} is not in the cart")]
    RemoveProduct(ProductId),

    /// Network, parse or storage failure.
    #[error("Failed to {operation}: {source}")]
    Operation {
        operation: CartOperation,
        source: OperationFailure,
    },
}

impl CartError {
    /// Wrap an unexpected failure of `operation`.
    pub fn operation(operation: CartOperation, source: impl Into<OperationFailure>) -> Self {
        Self::Operation {
            operation,
            source: source.into(),
        }
    }

    /// The single message shown to the shopper.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::StockLookup(_) => "Could not check stock for this product",
            Self::OutOfStock { .. } => "Requested quantity is out of stock",
            Self::ProductLookup(_)
            | Self::Operation {
                operation: CartOperation::Add,
                ..
            } => "Error adding product",
            Self::RemoveProduct(_)
            | Self::Operation {
                operation: CartOperation::Remove,
                ..
            } => "Error removing product",
            Self::Operation {
                operation: CartOperation::UpdateAmount,
                ..
            } => "Error updating product amount",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(4),
            requested: 6,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "Product 4 out of stock: requested 6, available 5"
        );

        let err = CartError::operation(
            CartOperation::Remove,
            StorageError::ReadOnly("cart".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "Failed to remove product: Storage is read-only, cannot write key cart"
        );
    }

    #[test]
    fn test_user_messages() {
        let id = ProductId::new(1);
        assert_eq!(
            CartError::ProductLookup(id).user_message(),
            "Error adding product"
        );
        assert_eq!(
            CartError::RemoveProduct(id).user_message(),
            "Error removing product"
        );
        assert_eq!(
            CartError::operation(
                CartOperation::UpdateAmount,
                StorageError::ReadOnly("cart".to_string())
            )
            .user_message(),
            "Error updating product amount"
        );
    }
}
