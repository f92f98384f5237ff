//! HTTP round-trip tests for the orders API
//!
//! These tests validate the full request path:
//! JSON → validation extractors → handlers → OrderService → JSON response.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;

use orderly::prelude::*;

fn make_server() -> TestServer {
    let state = AppState::new(Arc::new(InMemoryOrderService::new()));
    TestServer::new(build_router(state))
}

async fn create_order(server: &TestServer, name: &str, item: &str, quantity: i64, status: &str) -> Value {
    let response = server
        .post("/api/orders")
        .json(&json!({
            "customerName": name,
            "item": item,
            "quantity": quantity,
            "status": status,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

// ==============================================================
// Create
// ==============================================================

#[tokio::test]
async fn test_create_returns_201_with_generated_fields() {
    let server = make_server();

    let body = create_order(&server, "Ana Lopez", "Pillow", 2, "PENDING").await;

    assert_eq!(body["customerName"], "Ana Lopez");
    assert_eq!(body["item"], "Pillow");
    assert_eq!(body["quantity"], 2);
    assert_eq!(body["status"], "PENDING");
    // id must be a valid UUID and createdAt a parseable timestamp
    uuid::Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
    assert!(body["createdAt"].as_str().is_some());
}

#[tokio::test]
async fn test_create_invalid_payload_lists_all_violations() {
    let server = make_server();

    let response = server
        .post("/api/orders")
        .json(&json!({
            "customerName": "Al",
            "item": "",
            "quantity": 0,
            "status": "SHIPPED",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid request data");
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_create_rejects_unknown_fields() {
    let server = make_server();

    let response = server
        .post("/api/orders")
        .json(&json!({
            "customerName": "Ana Lopez",
            "item": "Pillow",
            "quantity": 2,
            "status": "PENDING",
            "discount": 10,
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["field"], "discount");
}

#[tokio::test]
async fn test_create_coerces_and_trims() {
    let server = make_server();

    let response = server
        .post("/api/orders")
        .json(&json!({
            "customerName": "  Ana Lopez  ",
            "item": "Pillow",
            "quantity": "3",
            "status": "PENDING",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["customerName"], "Ana Lopez");
    assert_eq!(body["quantity"], 3);
}

// ==============================================================
// Lifecycle
// ==============================================================

#[tokio::test]
async fn test_order_lifecycle() {
    let server = make_server();

    // create
    let created = create_order(&server, "Ana Lopez", "Pillow", 2, "PENDING").await;
    let id = created["id"].as_str().unwrap();

    // read back
    let fetched = server.get(&format!("/api/orders/{}", id)).await;
    fetched.assert_status(StatusCode::OK);
    let fetched: Value = fetched.json();
    assert_eq!(fetched["customerName"], "Ana Lopez");
    assert_eq!(fetched["quantity"], 2);

    // partial update: only status changes, quantity stays at 2
    let updated = server
        .put(&format!("/api/orders/{}", id))
        .json(&json!({"status": "COMPLETED"}))
        .await;
    updated.assert_status(StatusCode::OK);
    let updated: Value = updated.json();
    assert_eq!(updated["status"], "COMPLETED");
    assert_eq!(updated["quantity"], 2);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    // delete
    let deleted = server.delete(&format!("/api/orders/{}", id)).await;
    deleted.assert_status(StatusCode::OK);
    let deleted: Value = deleted.json();
    assert_eq!(
        deleted["message"],
        format!("Order with id {} was deleted successfully", id)
    );

    // gone
    let missing = server.get(&format!("/api/orders/{}", id)).await;
    missing.assert_status(StatusCode::NOT_FOUND);
}

// ==============================================================
// Not found / bad identifiers
// ==============================================================

#[tokio::test]
async fn test_get_unknown_id_returns_404_with_message() {
    let server = make_server();
    let id = uuid::Uuid::new_v4();

    let response = server.get(&format!("/api/orders/{}", id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], format!("Order with id {} not found", id));
}

#[tokio::test]
async fn test_invalid_uuid_is_rejected_before_lookup() {
    let server = make_server();

    for (method, path) in [
        ("GET", "/api/orders/not-a-uuid"),
        ("DELETE", "/api/orders/not-a-uuid"),
    ] {
        let response = match method {
            "GET" => server.get(path).await,
            _ => server.delete(path).await,
        };
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"][0]["field"], "id");
    }
}

#[tokio::test]
async fn test_update_unknown_id_returns_404() {
    let server = make_server();
    let id = uuid::Uuid::new_v4();

    let response = server
        .put(&format!("/api/orders/{}", id))
        .json(&json!({"status": "CANCELLED"}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_invalid_body_never_reaches_store() {
    let server = make_server();
    let created = create_order(&server, "Ana Lopez", "Pillow", 2, "PENDING").await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .put(&format!("/api/orders/{}", id))
        .json(&json!({"quantity": -1}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // row is untouched
    let fetched: Value = server.get(&format!("/api/orders/{}", id)).await.json();
    assert_eq!(fetched["quantity"], 2);
}

#[tokio::test]
async fn test_empty_update_returns_current_row() {
    let server = make_server();
    let created = create_order(&server, "Ana Lopez", "Pillow", 2, "PENDING").await;
    let id = created["id"].as_str().unwrap();

    let response = server
        .put(&format!("/api/orders/{}", id))
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["quantity"], 2);
    assert_eq!(body["status"], "PENDING");
}

#[tokio::test]
async fn test_delete_twice_returns_404_the_second_time() {
    let server = make_server();
    let created = create_order(&server, "Ana Lopez", "Pillow", 2, "PENDING").await;
    let id = created["id"].as_str().unwrap();

    server
        .delete(&format!("/api/orders/{}", id))
        .await
        .assert_status(StatusCode::OK);
    server
        .delete(&format!("/api/orders/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// ==============================================================
// List / pagination / filtering
// ==============================================================

#[tokio::test]
async fn test_list_defaults_to_first_page_of_ten() {
    let server = make_server();
    for i in 0..12 {
        create_order(&server, &format!("Customer {:02}", i), "Pillow", 1, "PENDING").await;
    }

    let response = server.get("/api/orders").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["orders"].as_array().unwrap().len(), 10);
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 10);
    assert_eq!(body["pagination"]["totalOrders"], 12);
    assert_eq!(body["pagination"]["totalPages"], 2);
}

#[tokio::test]
async fn test_list_twelve_rows_limit_five_gives_three_pages() {
    let server = make_server();
    for i in 0..12 {
        create_order(&server, &format!("Customer {:02}", i), "Pillow", 1, "PENDING").await;
    }

    let body: Value = server
        .get("/api/orders")
        .add_query_param("page", "1")
        .add_query_param("limit", "5")
        .add_query_param("status", "ALL")
        .await
        .json();
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["orders"].as_array().unwrap().len(), 5);

    // the last page holds the remainder, but the totals are unchanged
    let last: Value = server
        .get("/api/orders")
        .add_query_param("page", "3")
        .add_query_param("limit", "5")
        .await
        .json();
    assert_eq!(last["orders"].as_array().unwrap().len(), 2);
    assert_eq!(last["pagination"]["totalOrders"], 12);
    assert_eq!(last["pagination"]["totalPages"], 3);
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let server = make_server();
    create_order(&server, "First Customer", "Pillow", 1, "PENDING").await;
    create_order(&server, "Second Customer", "Blanket", 1, "PENDING").await;

    let body: Value = server.get("/api/orders").await.json();
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders[0]["customerName"], "Second Customer");
    assert_eq!(orders[1]["customerName"], "First Customer");
}

#[tokio::test]
async fn test_list_status_filter_is_superset_under_all() {
    let server = make_server();
    create_order(&server, "Ana Lopez", "Pillow", 1, "PENDING").await;
    create_order(&server, "Bob Stone", "Blanket", 1, "COMPLETED").await;
    create_order(&server, "Cara Dune", "Lamp Set", 1, "PENDING").await;
    create_order(&server, "Dan Frost", "Rug", 1, "CANCELLED").await;

    let all: Value = server.get("/api/orders").await.json();
    let total_all = all["pagination"]["totalOrders"].as_i64().unwrap();
    assert_eq!(total_all, 4);

    let mut sum = 0;
    for status in ["PENDING", "COMPLETED", "CANCELLED"] {
        let body: Value = server
            .get("/api/orders")
            .add_query_param("status", status)
            .await
            .json();
        let count = body["pagination"]["totalOrders"].as_i64().unwrap();
        assert!(count <= total_all);
        for order in body["orders"].as_array().unwrap() {
            assert_eq!(order["status"], status);
        }
        sum += count;
    }
    assert_eq!(sum, total_all);
}

#[tokio::test]
async fn test_list_rejects_invalid_query_values() {
    let server = make_server();

    let response = server
        .get("/api/orders")
        .add_query_param("page", "0")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["errors"][0]["message"], "Page must be a positive number.");

    let response = server
        .get("/api/orders")
        .add_query_param("limit", "abc")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/orders")
        .add_query_param("status", "shipped")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_ignores_unknown_query_params() {
    let server = make_server();
    create_order(&server, "Ana Lopez", "Pillow", 1, "PENDING").await;

    let response = server
        .get("/api/orders")
        .add_query_param("sort", "createdAt")
        .await;
    response.assert_status(StatusCode::OK);
}

// ==============================================================
// Misc endpoints
// ==============================================================

#[tokio::test]
async fn test_health_check() {
    let server = make_server();
    let response = server.get("/health").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ui_page_is_served_at_root() {
    let server = make_server();
    let response = server.get("/").await;
    response.assert_status(StatusCode::OK);
    assert!(response.text().contains("ORDER MANAGEMENT SYSTEM"));
}
