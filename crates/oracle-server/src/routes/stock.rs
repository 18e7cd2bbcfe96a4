//! Stock route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use rocket_cart_core::{ProductId, StockInfo};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Show current stock for one product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<StockInfo>> {
    state
        .inventory()
        .stock(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("stock {id}")))
}
