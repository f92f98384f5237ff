//! The order entity and its status enumeration

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::core::payload::{CreateOrder, UpdateOrder};

/// A customer purchase request.
///
/// `id` and `created_at` are assigned by the store at creation and are never
/// client-settable. All other fields can be changed through partial updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier, generated by the store
    pub id: Uuid,

    /// Customer display name (trimmed, at least 3 characters)
    pub customer_name: String,

    /// Ordered item (trimmed, at least 3 characters)
    pub item: String,

    /// Number of units, always >= 1
    pub quantity: i32,

    /// Current lifecycle status
    pub status: OrderStatus,

    /// When the order was created, assigned by the store
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Materialize a validated create payload into a full row.
    ///
    /// Used by stores that generate ids and timestamps in process (the
    /// in-memory backend). PostgreSQL generates both column defaults itself.
    pub fn from_create(fields: CreateOrder) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_name: fields.customer_name,
            item: fields.item,
            quantity: fields.quantity,
            status: fields.status,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update, leaving unset fields untouched.
    pub fn apply(&mut self, fields: UpdateOrder) {
        if let Some(customer_name) = fields.customer_name {
            self.customer_name = customer_name;
        }
        if let Some(item) = fields.item {
            self.item = item;
        }
        if let Some(quantity) = fields.quantity {
            self.quantity = quantity;
        }
        if let Some(status) = fields.status {
            self.status = status;
        }
    }
}

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "postgres",
    derive(sqlx::Type),
    sqlx(type_name = "order_status", rename_all = "UPPERCASE")
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// All accepted status values, in declaration order
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status: {}", other)),
        }
    }
}

/// Status filter used by list and count queries.
///
/// `All` omits the filter clause entirely; it is not a match-all literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    /// The concrete status to filter on, if any
    pub fn as_status(&self) -> Option<OrderStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(*status),
        }
    }

    /// Whether an order with the given status passes this filter
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("ALL"),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "ALL" {
            return Ok(StatusFilter::All);
        }
        s.parse::<OrderStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| format!("unknown status filter: {}", s))
    }
}
