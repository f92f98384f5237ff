//! List query parameters and pagination utilities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::order::{Order, StatusFilter};
use crate::core::payload::FieldError;

/// Validated query parameters for listing orders.
///
/// Values arrive as query-string text and are coerced to integers; both
/// coercion and range failures are reported as validation errors. Unknown
/// query parameters are ignored.
///
/// # Example
/// ```text
/// GET /api/orders?page=2&limit=5&status=PENDING
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListQuery {
    /// Page number (starts at 1)
    pub page: i64,

    /// Number of orders per page
    pub limit: i64,

    /// Status filter, `ALL` by default
    pub status: StatusFilter,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            status: StatusFilter::All,
        }
    }
}

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

impl ListQuery {
    /// Parse and validate raw query parameters, collecting all violations.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        let page = match params.get("page") {
            None => DEFAULT_PAGE,
            Some(raw) => positive_int(raw).unwrap_or_else(|| {
                errors.push(FieldError::new("page", "Page must be a positive number."));
                DEFAULT_PAGE
            }),
        };

        let limit = match params.get("limit") {
            None => DEFAULT_LIMIT,
            Some(raw) => positive_int(raw).unwrap_or_else(|| {
                errors.push(FieldError::new("limit", "Limit must be a positive number."));
                DEFAULT_LIMIT
            }),
        };

        let status = match params.get("status") {
            None => StatusFilter::All,
            Some(raw) => raw.parse::<StatusFilter>().unwrap_or_else(|_| {
                errors.push(FieldError::new(
                    "status",
                    "must be one of PENDING, COMPLETED, CANCELLED, ALL",
                ));
                StatusFilter::All
            }),
        };

        if errors.is_empty() {
            Ok(Self { page, limit, status })
        } else {
            Err(errors)
        }
    }

    /// Number of rows to skip for the requested page
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn positive_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|n| *n > 0)
}

/// One page of orders together with pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersPage {
    pub orders: Vec<Order>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata echoed alongside each page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: i64,

    /// Requested page size
    pub limit: i64,

    /// Total number of pages for the current filter
    pub total_pages: i64,

    /// Total number of orders matching the current filter
    pub total_orders: i64,
}

impl PaginationMeta {
    /// Compute metadata from the requested window and the independent
    /// total count.
    pub fn new(page: i64, limit: i64, total_orders: i64) -> Self {
        let limit = limit.max(1);
        let total_pages = if total_orders == 0 {
            0
        } else {
            (total_orders + limit - 1) / limit
        };

        Self {
            page,
            limit,
            total_pages,
            total_orders,
        }
    }
}
