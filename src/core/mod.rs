//! Core types: the order entity, validation, pagination, errors, and the
//! persistence accessor contract

pub mod error;
pub mod extractors;
pub mod order;
pub mod payload;
pub mod query;
pub mod service;

pub use error::{ApiError, StorageError};
pub use extractors::{ListParams, OrderId, Validated};
pub use order::{Order, OrderStatus, StatusFilter};
pub use payload::{CreateOrder, FieldError, UpdateOrder, ValidatePayload};
pub use query::{ListQuery, OrdersPage, PaginationMeta};
pub use service::OrderService;
