//! In-memory implementation of OrderService for testing and development

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::core::error::StorageError;
use crate::core::order::{Order, StatusFilter};
use crate::core::payload::{CreateOrder, UpdateOrder};
use crate::core::service::OrderService;

const BACKEND: &str = "in-memory";

/// In-memory order store.
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// ids and timestamps are generated in process.
#[derive(Clone, Default)]
pub struct InMemoryOrderService {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderService {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<Uuid, Order>>, StorageError> {
        self.orders
            .read()
            .map_err(|e| StorageError::query(BACKEND, format!("failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Order>>, StorageError> {
        self.orders.write().map_err(|e| {
            StorageError::query(BACKEND, format!("failed to acquire write lock: {}", e))
        })
    }
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    async fn list(
        &self,
        filter: StatusFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, StorageError> {
        let orders = self.read()?;

        let mut matching: Vec<Order> = orders
            .values()
            .filter(|order| filter.matches(order.status))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self, filter: StatusFilter) -> Result<i64, StorageError> {
        let orders = self.read()?;
        Ok(orders
            .values()
            .filter(|order| filter.matches(order.status))
            .count() as i64)
    }

    async fn create(&self, fields: CreateOrder) -> Result<Order, StorageError> {
        let order = Order::from_create(fields);
        let mut orders = self.write()?;
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Order>, StorageError> {
        let orders = self.read()?;
        Ok(orders.get(id).cloned())
    }

    async fn update(&self, id: &Uuid, fields: UpdateOrder) -> Result<Option<Order>, StorageError> {
        let mut orders = self.write()?;
        Ok(orders.get_mut(id).map(|order| {
            order.apply(fields);
            order.clone()
        }))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, StorageError> {
        let mut orders = self.write()?;
        Ok(orders.remove(id).is_some())
    }
}
