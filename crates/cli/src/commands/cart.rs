//! Cart commands.
//!
//! # Environment Variables
//!
//! - `CART_API_BASE_URL` - Stock oracle base URL
//! - `CART_STORAGE_PATH` - Local storage file
//! - `CART_STORAGE_KEY` - Key the cart snapshot is stored under

use std::sync::Arc;

use rocket_cart::{CartConfig, CartError, CartStore, ConfigError, HttpStockOracle, OracleError};
use rocket_cart_core::{Cart, ProductId};
use thiserror::Error;
use tokio::sync::watch;
use tracing::info;

/// Errors that can occur while setting up the store.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Stock oracle client error: {0}")]
    Oracle(#[from] OracleError),
}

pub type Store = CartStore<HttpStockOracle>;

/// Open the store configured by the environment.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the HTTP client fails to build.
pub fn open_store() -> Result<Store, SetupError> {
    let config = CartConfig::from_env()?;
    info!(
        oracle = %config.api_base_url,
        storage = %config.storage_path.display(),
        "Opening cart"
    );
    Ok(CartStore::from_config(&config)?)
}

/// Log the current cart.
pub fn show(store: &Store) {
    log_cart(&store.snapshot());
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns the rejection if the store refused the operation.
pub async fn add(store: &Store, product_id: ProductId) -> Result<(), CartError> {
    let mut updates = store.subscribe();
    store.add_product(product_id).await?;
    log_committed(&mut updates);
    Ok(())
}

/// Remove a product.
///
/// # Errors
///
/// Returns the rejection if the store refused the operation.
pub async fn remove(store: &Store, product_id: ProductId) -> Result<(), CartError> {
    let mut updates = store.subscribe();
    store.remove_product(product_id).await?;
    log_committed(&mut updates);
    Ok(())
}

/// Set a product's amount.
///
/// # Errors
///
/// Returns the rejection if the store refused the operation.
pub async fn set_amount(store: &Store, product_id: ProductId, amount: i64) -> Result<(), CartError> {
    let mut updates = store.subscribe();
    store.update_product_amount(product_id, amount).await?;
    log_committed(&mut updates);
    Ok(())
}

/// Log the cart if the operation committed a new one.
fn log_committed(updates: &mut watch::Receiver<Arc<Cart>>) {
    if updates.has_changed().unwrap_or(false) {
        let cart = Arc::clone(&updates.borrow_and_update());
        log_cart(&cart);
    } else {
        info!("Cart unchanged");
    }
}

fn log_cart(cart: &Cart) {
    if cart.is_empty() {
        info!("Cart is empty");
        return;
    }

    for line in cart {
        info!(
            id = %line.id(),
            amount = line.amount,
            price = %line.product.price,
            total = %line.total(),
            "{}",
            line.product.title
        );
    }
    info!(
        lines = cart.len(),
        items = cart.item_count(),
        subtotal = %cart.subtotal(),
        "Cart summary"
    );
}
