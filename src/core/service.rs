//! Persistence accessor trait for orders

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::StorageError;
use crate::core::order::{Order, StatusFilter};
use crate::core::payload::{CreateOrder, UpdateOrder};

/// Service trait for order persistence.
///
/// Implementations provide single-round-trip CRUD operations against one
/// `orders` relation; the rest of the crate is agnostic to the backend.
/// Missing rows are reported through return types (`Option` / `bool`), never
/// through [`StorageError`], so callers can distinguish "not found" from a
/// persistence failure.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// List one page of orders, newest `created_at` first.
    ///
    /// `StatusFilter::All` omits the filter clause entirely.
    async fn list(
        &self,
        filter: StatusFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, StorageError>;

    /// Count all rows matching the filter, independently of any page window.
    async fn count(&self, filter: StatusFilter) -> Result<i64, StorageError>;

    /// Insert a new order; the store generates `id` and `created_at`.
    async fn create(&self, fields: CreateOrder) -> Result<Order, StorageError>;

    /// Fetch an order by id.
    async fn get(&self, id: &Uuid) -> Result<Option<Order>, StorageError>;

    /// Apply the supplied fields to an existing order.
    ///
    /// Returns `None` when no row matches `id`. An empty update returns the
    /// current row unchanged.
    async fn update(&self, id: &Uuid, fields: UpdateOrder) -> Result<Option<Order>, StorageError>;

    /// Delete an order; `false` when no row matched.
    async fn delete(&self, id: &Uuid) -> Result<bool, StorageError>;
}
