//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use rocket_cart_core::{CatalogEntry, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// List every catalog entry.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(state.inventory().products().to_vec())
}

/// Show one catalog entry.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<CatalogEntry>> {
    state
        .inventory()
        .product(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
