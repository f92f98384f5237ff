//! Router builder for the orders API

use axum::routing::get;
use axum::Router;

use crate::server::handlers::{
    AppState, create_order, delete_order, get_order, list_orders, update_order,
};

/// Build the `/api/orders` route table:
/// - GET /api/orders - List orders with pagination and status filter
/// - POST /api/orders - Create an order
/// - GET /api/orders/{id} - Get an order by id
/// - PUT /api/orders/{id} - Partially update an order
/// - DELETE /api/orders/{id} - Delete an order
pub fn build_order_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route(
            "/api/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .with_state(state)
}
