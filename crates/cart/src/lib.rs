//! Rocket Cart - client-side cart state store.
//!
//! Tracks which products a shopper has selected and how many of each,
//! validates quantities against a remote stock oracle, and keeps a persisted
//! snapshot of the cart in a local key/value storage.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the committed cart and serializes mutations
//!   through a single writer
//! - [`oracle::StockOracle`] is the read-only stock and catalog source;
//!   [`oracle::HttpStockOracle`] talks to it over HTTP
//! - [`storage::SnapshotStorage`] persists the cart as a JSON array under one key
//! - [`notify::Notifier`] receives exactly one user-facing message per failure
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_cart::{CartConfig, CartStore};
//!
//! let config = CartConfig::from_env()?;
//! let store = CartStore::from_config(&config)?;
//!
//! let mut updates = store.subscribe();
//! store.add_product(ProductId::new(1)).await?;
//! assert_eq!(updates.borrow_and_update().amount_of(ProductId::new(1)), 1);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod notify;
pub mod oracle;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, CartOperation, OperationFailure};
pub use notify::{MemoryNotifier, Notifier, TracingNotifier};
pub use oracle::{HttpStockOracle, OracleError, StockOracle};
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage, StorageError};
pub use store::{CartStore, DEFAULT_STORAGE_KEY};
