//! HTTP handlers for the product catalog and cart sessions.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use tracing::info;
use uuid::Uuid;

use crate::models::Product;
use crate::sales::Order;

use super::handlers::{ApiResult, json_body, path_param, rejected};
use super::request::{AddCartItemRequest, CreateProductRequest, SetQuantityRequest};
use super::response::CartResponse;
use super::state::AppState;

pub(super) async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let correlation_id = Uuid::new_v4();
    let products = state
        .catalog()
        .list()
        .map_err(|e| rejected(correlation_id, "list_products", e))?;
    Ok((StatusCode::OK, Json(products)))
}

pub(super) async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> ApiResult<Product> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(correlation_id, payload)?;
    let vat_rate = request
        .vat_rate
        .unwrap_or_else(|| state.config().default_vat_rate());

    let product = state
        .catalog()
        .create(&request.name, request.unit_price, vat_rate)
        .map_err(|e| rejected(correlation_id, "create_product", e))?;

    info!(
        correlation_id = %correlation_id,
        product_id = %product.id,
        unit_price = %product.unit_price,
        vat_rate = %product.vat_rate,
        "Product created"
    );
    Ok((StatusCode::CREATED, Json(product)))
}

pub(super) async fn open_cart(State(state): State<AppState>) -> ApiResult<CartResponse> {
    let correlation_id = Uuid::new_v4();
    let cart = state
        .carts()
        .open()
        .map_err(|e| rejected(correlation_id, "open_cart", e))?;

    info!(correlation_id = %correlation_id, session_id = %cart.session_id, "Cart opened");
    Ok((StatusCode::CREATED, Json(cart.into())))
}

pub(super) async fn get_cart(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<CartResponse> {
    let correlation_id = Uuid::new_v4();
    let session_id = path_param(correlation_id, path)?;
    let cart = state
        .carts()
        .get(session_id)
        .map_err(|e| rejected(correlation_id, "get_cart", e))?;
    Ok((StatusCode::OK, Json(cart.into())))
}

pub(super) async fn add_item(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AddCartItemRequest>, JsonRejection>,
) -> ApiResult<CartResponse> {
    let correlation_id = Uuid::new_v4();
    let session_id = path_param(correlation_id, path)?;
    let request = json_body(correlation_id, payload)?;

    let cart = state
        .catalog()
        .get(&request.product_id)
        .and_then(|product| state.carts().add_item(session_id, &product, request.quantity))
        .map_err(|e| rejected(correlation_id, "add_item", e))?;

    info!(
        correlation_id = %correlation_id,
        session_id = %session_id,
        product_id = %request.product_id,
        quantity = request.quantity,
        "Item added to cart"
    );
    Ok((StatusCode::OK, Json(cart.into())))
}

pub(super) async fn set_quantity(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, String)>, PathRejection>,
    payload: Result<Json<SetQuantityRequest>, JsonRejection>,
) -> ApiResult<CartResponse> {
    let correlation_id = Uuid::new_v4();
    let (session_id, product_id) = path_param(correlation_id, path)?;
    let request = json_body(correlation_id, payload)?;

    let cart = state
        .carts()
        .set_quantity(session_id, &product_id, request.quantity)
        .map_err(|e| rejected(correlation_id, "set_quantity", e))?;

    info!(
        correlation_id = %correlation_id,
        session_id = %session_id,
        product_id = %product_id,
        quantity = request.quantity,
        "Cart quantity set"
    );
    Ok((StatusCode::OK, Json(cart.into())))
}

pub(super) async fn remove_item(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, String)>, PathRejection>,
) -> ApiResult<CartResponse> {
    let correlation_id = Uuid::new_v4();
    let (session_id, product_id) = path_param(correlation_id, path)?;

    let cart = state
        .carts()
        .remove_item(session_id, &product_id)
        .map_err(|e| rejected(correlation_id, "remove_item", e))?;

    info!(
        correlation_id = %correlation_id,
        session_id = %session_id,
        product_id = %product_id,
        "Item removed from cart"
    );
    Ok((StatusCode::OK, Json(cart.into())))
}

pub(super) async fn checkout(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Order> {
    let correlation_id = Uuid::new_v4();
    let session_id = path_param(correlation_id, path)?;

    let order = state
        .carts()
        .checkout(session_id)
        .map_err(|e| rejected(correlation_id, "checkout", e))?;

    info!(
        correlation_id = %correlation_id,
        session_id = %session_id,
        order_id = %order.id,
        total = %order.totals.total,
        item_count = order.totals.item_count,
        "Cart checked out"
    );
    Ok((StatusCode::CREATED, Json(order)))
}

pub(super) async fn list_orders(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Vec<Order>> {
    let correlation_id = Uuid::new_v4();
    let session_id = path_param(correlation_id, path)?;
    let orders = state
        .carts()
        .orders_for(session_id)
        .map_err(|e| rejected(correlation_id, "list_orders", e))?;
    Ok((StatusCode::OK, Json(orders)))
}

pub(super) async fn discard_cart(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, super::response::ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let session_id = path_param(correlation_id, path)?;

    state
        .carts()
        .discard(session_id)
        .map_err(|e| rejected(correlation_id, "discard_cart", e))?;

    info!(correlation_id = %correlation_id, session_id = %session_id, "Cart discarded");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use crate::config::ConfigLoader;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_product_vat_defaults_from_config() {
        let state = AppState::new(ConfigLoader::statutory());
        let router = create_router(state.clone());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/products")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"name": "Arroz 5kg", "unit_price": "450"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let product: Product = serde_json::from_slice(&body).unwrap();
        assert_eq!(product.vat_rate, Decimal::new(16, 2));
        assert_eq!(state.catalog().get(&product.id).unwrap(), product);
    }

    #[tokio::test]
    async fn test_unknown_cart_returns_404() {
        let router = create_router(AppState::new(ConfigLoader::statutory()));

        let response = router
            .oneshot(
                Request::builder()
                    .uri(format!("/carts/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_discard_returns_no_content() {
        let state = AppState::new(ConfigLoader::statutory());
        let cart = state.carts().open().unwrap();
        let router = create_router(state.clone());

        let response = router
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/carts/{}", cart.session_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(state.carts().get(cart.session_id).is_err());
    }
}
