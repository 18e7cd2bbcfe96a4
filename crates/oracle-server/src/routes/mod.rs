//! HTTP route handlers for the oracle server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /products               - Every catalog entry
//! GET  /products/{id}          - One catalog entry (404 if unknown)
//! GET  /stock/{id}             - Stock for one product (404 if unknown)
//! ```

pub mod products;
pub mod stock;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the catalog and stock routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/stock/{id}", get(stock::show))
}
