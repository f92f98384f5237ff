//! # Orderly
//!
//! A small order-management service: a JSON REST API over a single `orders`
//! relation, with pagination, status filtering, strict request validation,
//! and a typed client that caches pages and prefetches the next one.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orderly::prelude::*;
//! use std::sync::Arc;
//!
//! let state = AppState::new(Arc::new(InMemoryOrderService::new()));
//! let app = orderly::server::build_router(state);
//! orderly::server::serve("127.0.0.1:3000", app).await?;
//! ```
//!
//! The API lives under `/api/orders`:
//!
//! | Method | Path              | Success                          |
//! |--------|-------------------|----------------------------------|
//! | GET    | `/api/orders`     | 200 `{orders, pagination}`       |
//! | POST   | `/api/orders`     | 201 created order                |
//! | GET    | `/api/orders/:id` | 200 order                        |
//! | PUT    | `/api/orders/:id` | 200 updated order                |
//! | DELETE | `/api/orders/:id` | 200 confirmation message         |
//!
//! Storage backends: an in-memory store (default) and PostgreSQL via sqlx
//! behind the `postgres` feature.

pub mod client;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ApiError, StorageError},
        order::{Order, OrderStatus, StatusFilter},
        payload::{CreateOrder, FieldError, UpdateOrder, ValidatePayload},
        query::{ListQuery, OrdersPage, PaginationMeta},
        service::OrderService,
    };

    // === Storage ===
    pub use crate::storage::InMemoryOrderService;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresOrderService;

    // === Server ===
    pub use crate::server::{AppState, build_router, serve};

    // === Client ===
    pub use crate::client::{ClientError, OrdersBrowser, OrdersCache, OrdersClient};

    // === Config ===
    pub use crate::config::AppConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
