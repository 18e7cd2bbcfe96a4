//! Application state shared across handlers.

use std::sync::Arc;

use crate::inventory::Inventory;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    inventory: Inventory,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inner: Arc::new(AppStateInner { inventory }),
        }
    }

    #[must_use]
    pub fn inventory(&self) -> &Inventory {
        &self.inner.inventory
    }
}
