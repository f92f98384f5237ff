//! PostgreSQL storage backend using sqlx.
//!
//! Provides an `OrderService` implementation backed by an `orders` table via
//! `sqlx::PgPool`. The store generates ids (`gen_random_uuid()`) and creation
//! timestamps (`now()`) through column defaults; `status` is a native
//! `order_status` enum type.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! orderly = { version = "0.1", features = ["postgres"] }
//! ```

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::core::error::StorageError;
use crate::core::order::{Order, StatusFilter};
use crate::core::payload::{CreateOrder, UpdateOrder};
use crate::core::service::OrderService;

const BACKEND: &str = "postgres";

const ORDER_COLUMNS: &str = "id, customer_name, item, quantity, status, created_at";

/// Order store backed by PostgreSQL.
#[derive(Clone, Debug)]
pub struct PostgresOrderService {
    pool: PgPool,
}

impl PostgresOrderService {
    /// Create a store from an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database and run pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| StorageError::connection(BACKEND, e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StorageError::connection(BACKEND, e.to_string()))?;

        Ok(Self::new(pool))
    }

    fn query_error(e: sqlx::Error) -> StorageError {
        StorageError::query(BACKEND, e.to_string())
    }
}

#[async_trait]
impl OrderService for PostgresOrderService {
    async fn list(
        &self,
        filter: StatusFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, StorageError> {
        // ALL omits the WHERE clause entirely rather than matching a literal.
        let rows = match filter.as_status() {
            Some(status) => {
                sqlx::query_as::<_, Order>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders WHERE status = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3"
                ))
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Order>(&format!(
                    "SELECT {ORDER_COLUMNS} FROM orders \
                     ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        };
        rows.map_err(Self::query_error)
    }

    async fn count(&self, filter: StatusFilter) -> Result<i64, StorageError> {
        let count = match filter.as_status() {
            Some(status) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE status = $1")
                    .bind(status)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
                    .fetch_one(&self.pool)
                    .await
            }
        };
        count.map_err(Self::query_error)
    }

    async fn create(&self, fields: CreateOrder) -> Result<Order, StorageError> {
        sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (customer_name, item, quantity, status) \
             VALUES ($1, $2, $3, $4) RETURNING {ORDER_COLUMNS}"
        ))
        .bind(fields.customer_name)
        .bind(fields.item)
        .bind(fields.quantity)
        .bind(fields.status)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::query_error)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Order>, StorageError> {
        sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::query_error)
    }

    async fn update(&self, id: &Uuid, fields: UpdateOrder) -> Result<Option<Order>, StorageError> {
        // An empty SET list is invalid SQL; an empty update is a no-op read.
        if fields.is_empty() {
            return self.get(id).await;
        }

        let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new("UPDATE orders SET ");
        let mut assignments = builder.separated(", ");
        if let Some(customer_name) = fields.customer_name {
            assignments.push("customer_name = ");
            assignments.push_bind_unseparated(customer_name);
        }
        if let Some(item) = fields.item {
            assignments.push("item = ");
            assignments.push_bind_unseparated(item);
        }
        if let Some(quantity) = fields.quantity {
            assignments.push("quantity = ");
            assignments.push_bind_unseparated(quantity);
        }
        if let Some(status) = fields.status {
            assignments.push("status = ");
            assignments.push_bind_unseparated(status);
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(format!(" RETURNING {ORDER_COLUMNS}"));

        builder
            .build_query_as::<Order>()
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::query_error)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Self::query_error)?;

        Ok(result.rows_affected() > 0)
    }
}
