//! Integration tests for Rocket Cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocket-cart-integration-tests
//! ```
//!
//! Each test starts the oracle server router on an ephemeral port and drives
//! a real [`CartStore`] over HTTP with file-backed storage.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rocket_cart::{
    CartStore, DEFAULT_STORAGE_KEY, FileStorage, HttpStockOracle, MemoryNotifier, Notifier,
    SnapshotStorage,
};
use rocket_cart_oracle_server::config::OracleConfig;
use rocket_cart_oracle_server::inventory::Inventory;
use rocket_cart_oracle_server::state::AppState;
use tokio::task::JoinHandle;
use url::Url;

/// A running oracle server.
pub struct TestOracle {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestOracle {
    /// Serve `inventory_json` on `127.0.0.1` with an OS-assigned port.
    ///
    /// # Panics
    ///
    /// Panics if the inventory is invalid or the listener cannot bind.
    #[allow(clippy::unwrap_used)]
    pub async fn start(inventory_json: &str) -> Self {
        let inventory = Inventory::from_json(inventory_json).unwrap();
        let config = OracleConfig::from_lookup(|key| {
            (key == "ORACLE_PORT").then(|| "0".to_string())
        })
        .unwrap();
        let app = rocket_cart_oracle_server::app(AppState::new(inventory));

        let listener = tokio::net::TcpListener::bind(config.socket_addr()).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, handle }
    }

    /// Base URL of the server.
    ///
    /// # Panics
    ///
    /// Panics if the address does not form a valid URL.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    /// A store talking to this server, persisting to `storage_path`.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[allow(clippy::unwrap_used)]
    pub fn open_store(
        &self,
        storage_path: &Path,
        notifier: Arc<MemoryNotifier>,
    ) -> CartStore<HttpStockOracle> {
        let oracle = HttpStockOracle::new(&self.base_url(), Duration::from_secs(60)).unwrap();
        CartStore::open(
            oracle,
            Arc::new(FileStorage::new(storage_path)) as Arc<dyn SnapshotStorage>,
            notifier as Arc<dyn Notifier>,
            DEFAULT_STORAGE_KEY,
        )
    }
}

impl Drop for TestOracle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
