//! Order management server binary

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use orderly::config::AppConfig;
use orderly::server::{self, AppState};
use orderly::storage::InMemoryOrderService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    let state = build_state(&config).await?;
    let app = server::build_router(state);

    server::serve(&config.bind_addr(), app).await
}

/// Pick the storage backend from configuration.
#[cfg(feature = "postgres")]
async fn build_state(config: &AppConfig) -> Result<AppState> {
    use orderly::storage::PostgresOrderService;

    match &config.database_url {
        Some(url) => {
            let store = PostgresOrderService::connect(url).await?;
            tracing::info!("Using PostgreSQL order store");
            Ok(AppState::new(Arc::new(store)))
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory order store");
            Ok(AppState::new(Arc::new(InMemoryOrderService::new())))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn build_state(config: &AppConfig) -> Result<AppState> {
    if config.database_url.is_some() {
        tracing::warn!("DATABASE_URL is set but the postgres feature is disabled, using in-memory order store");
    } else {
        tracing::info!("Using in-memory order store");
    }
    Ok(AppState::new(Arc::new(InMemoryOrderService::new())))
}
