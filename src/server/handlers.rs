//! HTTP request handlers for the orders API
//!
//! Each handler receives an already-validated request (extractors reject
//! invalid input first), performs its persistence calls, and shapes the JSON
//! response. Storage failures propagate as `ApiError` and are answered by
//! the generic 500 path.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::error::ApiError;
use crate::core::extractors::{ListParams, OrderId, Validated};
use crate::core::order::Order;
use crate::core::payload::{CreateOrder, UpdateOrder};
use crate::core::query::{OrdersPage, PaginationMeta};
use crate::core::service::OrderService;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderService>,
}

impl AppState {
    pub fn new(orders: Arc<dyn OrderService>) -> Self {
        Self { orders }
    }
}

/// GET /api/orders — list one page of orders with pagination metadata.
///
/// The total is computed by an independent count query with the same filter,
/// so the metadata reflects the full matching set even on a short last page.
pub async fn list_orders(
    State(state): State<AppState>,
    ListParams(query): ListParams,
) -> Result<Json<OrdersPage>, ApiError> {
    let orders = state
        .orders
        .list(query.status, query.limit, query.offset())
        .await?;
    let total_orders = state.orders.count(query.status).await?;

    Ok(Json(OrdersPage {
        orders,
        pagination: PaginationMeta::new(query.page, query.limit, total_orders),
    }))
}

/// POST /api/orders — create an order, responding 201 with the stored row.
pub async fn create_order(
    State(state): State<AppState>,
    Validated(payload): Validated<CreateOrder>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.orders.create(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    OrderId(id): OrderId,
) -> Result<Json<Order>, ApiError> {
    state
        .orders
        .get(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { id })
}

/// PUT /api/orders/{id} — partial update; unset fields keep prior values.
pub async fn update_order(
    State(state): State<AppState>,
    OrderId(id): OrderId,
    Validated(payload): Validated<UpdateOrder>,
) -> Result<Json<Order>, ApiError> {
    state
        .orders
        .update(&id, payload)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { id })
}

/// DELETE /api/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    OrderId(id): OrderId,
) -> Result<Json<Value>, ApiError> {
    if state.orders.delete(&id).await? {
        Ok(Json(json!({
            "message": format!("Order with id {} was deleted successfully", id),
        })))
    } else {
        Err(ApiError::NotFound { id })
    }
}
