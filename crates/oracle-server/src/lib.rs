//! Rocket Cart oracle server library.
//!
//! A fake stock and catalog API serving a JSON inventory file, used as the
//! stock oracle while developing against the cart store. Exposed as a library
//! so the router can be tested and embedded.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod inventory;
pub mod routes;
pub mod state;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    use super::*;
    use crate::inventory::Inventory;

    fn test_app() -> Router {
        let inventory = Inventory::from_json(
            r#"{
                "products": [{"id": 1, "title": "Runner", "price": 179.9, "image": "r.jpg"}],
                "stock": [{"id": 1, "amount": 3}]
            }"#,
        )
        .unwrap();
        app(AppState::new(inventory))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stock_lookup() {
        let (status, body) = get(test_app(), "/stock/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"id": 1, "amount": 3}));

        let (status, body) = get(test_app(), "/stock/2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let (status, body) = get(test_app(), "/products/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Runner");
        let price: Decimal = serde_json::from_value(body["price"].clone()).unwrap();
        assert_eq!(price, Decimal::new(1799, 1));

        let (status, _) = get(test_app(), "/products/2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_product_list_and_bad_id() {
        let (status, body) = get(test_app(), "/products").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = get(test_app(), "/stock/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
