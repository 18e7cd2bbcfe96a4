//! The cart store.
//!
//! Owns the committed [`Cart`], applies the three mutations (add, remove,
//! set amount) and broadcasts each committed cart to subscribers.
//!
//! # Commit protocol
//!
//! 1. Acquire the writer lock (held for the whole operation, oracle calls included)
//! 2. Clone the latest committed cart and apply the mutation to the copy
//! 3. Write the JSON snapshot to storage
//! 4. Publish the new cart on the watch channel
//!
//! A failure at any step leaves both the published cart and the persisted
//! snapshot untouched, and is reported once through the [`Notifier`].

use std::sync::Arc;

use rocket_cart_core::{Cart, ProductId};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use crate::config::CartConfig;
use crate::error::{CartError, CartOperation};
use crate::notify::{Notifier, TracingNotifier};
use crate::oracle::{HttpStockOracle, OracleError, StockOracle};
use crate::storage::{FileStorage, SnapshotStorage, StorageError};

/// Storage key the cart snapshot is kept under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Cart state store.
///
/// Construct once and share by reference (or `Arc`) with every consumer.
pub struct CartStore<O> {
    oracle: O,
    storage: Arc<dyn SnapshotStorage>,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
    state: watch::Sender<Arc<Cart>>,
    writer: Mutex<()>,
}

impl CartStore<HttpStockOracle> {
    /// Build a store backed by the HTTP oracle and file storage from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &CartConfig) -> Result<Self, OracleError> {
        let oracle = HttpStockOracle::from_config(config)?;
        Ok(Self::open(
            oracle,
            Arc::new(FileStorage::new(&config.storage_path)),
            Arc::new(TracingNotifier),
            &config.storage_key,
        ))
    }
}

impl<O: StockOracle> CartStore<O> {
    /// Create a store, hydrating the cart from the snapshot under `storage_key`.
    ///
    /// A missing, unreadable or corrupt snapshot yields an empty cart.
    pub fn open(
        oracle: O,
        storage: Arc<dyn SnapshotStorage>,
        notifier: Arc<dyn Notifier>,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let cart = hydrate(storage.as_ref(), &storage_key);
        info!(
            storage_key = %storage_key,
            lines = cart.len(),
            "Cart hydrated"
        );

        let (state, _) = watch::channel(Arc::new(cart));

        Self {
            oracle,
            storage,
            notifier,
            storage_key,
            state,
            writer: Mutex::new(()),
        }
    }

    /// The latest committed cart.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Cart> {
        Arc::clone(&self.state.borrow())
    }

    /// Receive every committed cart from now on.
    ///
    /// The receiver starts out holding the current cart, marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Cart>> {
        self.state.subscribe()
    }

    #[must_use]
    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Add one unit of a product.
    ///
    /// A new product enters the cart with amount 1; an existing line is
    /// incremented. Either way the oracle must report enough stock for the
    /// resulting amount.
    ///
    /// # Errors
    ///
    /// - [`CartError::StockLookup`] if the oracle has no stock record
    /// - [`CartError::OutOfStock`] if stock does not cover one more unit
    /// - [`CartError::ProductLookup`] if a new product has no catalog entry
    /// - [`CartError::Operation`] on oracle or storage failure
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let _writer = self.writer.lock().await;
        let result = self.try_add_product(product_id).await;
        self.report(result)
    }

    /// Remove a product's line.
    ///
    /// # Errors
    ///
    /// - [`CartError::RemoveProduct`] if the product is not in the cart
    /// - [`CartError::Operation`] on storage failure
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let _writer = self.writer.lock().await;
        let result = self.try_remove_product(product_id);
        self.report(result)
    }

    /// Set a product's amount.
    ///
    /// Amounts `<= 0` are ignored without error. Increases are checked against
    /// the oracle; decreases are applied without a stock query. A product that
    /// is not in the cart is left absent.
    ///
    /// # Errors
    ///
    /// - [`CartError::StockLookup`] if an increase finds no stock record
    /// - [`CartError::OutOfStock`] if an increase exceeds available stock
    /// - [`CartError::Operation`] on oracle or storage failure
    #[instrument(skip(self), fields(product_id = %product_id, amount = amount))]
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Arc<Cart>, CartError> {
        let Ok(amount @ 1..) = u64::try_from(amount) else {
            debug!("Ignoring non-positive amount");
            return Ok(self.snapshot());
        };

        let _writer = self.writer.lock().await;
        let result = self.try_update_product_amount(product_id, amount).await;
        self.report(result)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let op = CartOperation::Add;

        let stock = self
            .oracle
            .stock(product_id)
            .await
            .map_err(|e| CartError::operation(op, e))?
            .ok_or(CartError::StockLookup(product_id))?;

        let mut cart = Cart::clone(&self.snapshot());
        let requested = u64::from(cart.amount_of(product_id)) + 1;
        if !stock.covers(requested) {
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        if cart.increment(product_id).is_none() {
            let product = self
                .oracle
                .product(product_id)
                .await
                .map_err(|e| CartError::operation(op, e))?
                .ok_or(CartError::ProductLookup(product_id))?;
            cart.push_first_unit(product);
        }

        let cart = self.commit(cart).map_err(|e| CartError::operation(op, e))?;
        info!(
            amount = cart.amount_of(product_id),
            available = stock.amount,
            "Product added"
        );
        Ok(cart)
    }

    fn try_remove_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let mut cart = Cart::clone(&self.snapshot());
        if cart.remove(product_id).is_none() {
            return Err(CartError::RemoveProduct(product_id));
        }

        let cart = self
            .commit(cart)
            .map_err(|e| CartError::operation(CartOperation::Remove, e))?;
        info!(lines = cart.len(), "Product removed");
        Ok(cart)
    }

    async fn try_update_product_amount(
        &self,
        product_id: ProductId,
        amount: u64,
    ) -> Result<Arc<Cart>, CartError> {
        let op = CartOperation::UpdateAmount;
        let current = self.snapshot();

        if amount > u64::from(current.amount_of(product_id)) {
            let stock = self
                .oracle
                .stock(product_id)
                .await
                .map_err(|e| CartError::operation(op, e))?
                .ok_or(CartError::StockLookup(product_id))?;

            if !stock.covers(amount) {
                return Err(CartError::OutOfStock {
                    product_id,
                    requested: amount,
                    available: stock.amount,
                });
            }
        }

        // Within stock, so it fits in the oracle's u32.
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);
        let mut cart = Cart::clone(&current);
        if !cart.set_amount(product_id, amount) {
            debug!("Product not in cart, nothing to update");
            return Ok(current);
        }

        let cart = self.commit(cart).map_err(|e| CartError::operation(op, e))?;
        info!(amount, "Product amount updated");
        Ok(cart)
    }

    /// Persist `cart` and publish it.
    fn commit(&self, cart: Cart) -> Result<Arc<Cart>, StorageError> {
        let json = serde_json::to_string(&cart)?;
        self.storage.write(&self.storage_key, &json)?;

        let cart = Arc::new(cart);
        self.state.send_replace(Arc::clone(&cart));
        Ok(cart)
    }

    /// Emit the user-facing notification for a failed operation.
    fn report<T>(&self, result: Result<T, CartError>) -> Result<T, CartError> {
        if let Err(err) = &result {
            warn!(error = %err, "Cart operation rejected");
            self.notifier.error(err.user_message());
        }
        result
    }
}

/// Load the persisted cart, falling back to an empty one.
fn hydrate(storage: &dyn SnapshotStorage, key: &str) -> Cart {
    match storage.read(key) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(error = %e, "Discarding unreadable cart snapshot");
            Cart::new()
        }),
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read cart snapshot");
            Cart::new()
        }
    }
}
