//! HTTP server assembly: routes, middleware, and the serve loop

pub mod handlers;
pub mod router;

use anyhow::Result;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handlers::AppState;

/// Build the full application router.
///
/// Merges the orders API with the health checks and the embedded UI page,
/// then layers request tracing and permissive CORS on top.
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check));

    let ui_routes = Router::new().route("/", get(ui_page));

    health_routes
        .merge(ui_routes)
        .merge(router::build_order_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "orderly"
    }))
}

/// Single-page order management UI
async fn ui_page() -> Html<&'static str> {
    Html(include_str!("../../assets/orders.html"))
}

/// Serve the application with graceful shutdown.
///
/// Binds the address, starts serving requests, and handles SIGTERM and
/// SIGINT (Ctrl+C) for graceful shutdown.
pub async fn serve(addr: &str, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
