//! Typed error handling for the order service
//!
//! Three failure categories cross the HTTP boundary:
//!
//! - [`ApiError::Validation`]: malformed or out-of-range input, reported as
//!   400 with field-level messages
//! - [`ApiError::NotFound`]: a referenced identifier has no row, reported as
//!   404 with a human-readable message
//! - [`ApiError::Storage`] / [`ApiError::Internal`]: the store is unreachable
//!   or something unexpected broke; logged server-side with full detail and
//!   reported as 500 with a generic message only

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;
use uuid::Uuid;

use crate::core::payload::FieldError;

/// The error type handlers return; `IntoResponse` maps each variant to the
/// documented wire shape.
#[derive(Debug)]
pub enum ApiError {
    /// Input validation failed; carries every violated field
    Validation(Vec<FieldError>),

    /// No order exists for the given id
    NotFound { id: Uuid },

    /// The persistence layer failed
    Storage(StorageError),

    /// Unexpected failure that should not happen in normal operation
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound { .. } => "ORDER_NOT_FOUND",
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ApiError::NotFound { id } => write!(f, "Order with id {} not found", id),
            ApiError::Storage(e) => write!(f, "{}", e),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Validation(errors) => json!({
                "message": "Invalid request data",
                "errors": errors,
            }),
            ApiError::NotFound { id } => json!({
                "message": format!("Order with id {} not found", id),
            }),
            // Full detail stays in the server log; the client only sees a
            // generic message.
            ApiError::Storage(_) | ApiError::Internal(_) => {
                tracing::error!(error = %self, code = self.error_code(), "request failed");
                json!({
                    "status": "error",
                    "message": "Something went very wrong!",
                })
            }
        };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Storage errors
// =============================================================================

/// Errors raised by storage backends.
///
/// Distinct from "no row matched": accessor operations report missing rows
/// through their return types, never through this error.
#[derive(Debug)]
pub enum StorageError {
    /// Could not reach or initialize the backend
    Connection {
        backend: &'static str,
        message: String,
    },

    /// A query failed to execute
    Query {
        backend: &'static str,
        message: String,
    },
}

impl StorageError {
    pub fn connection(backend: &'static str, message: impl Into<String>) -> Self {
        StorageError::Connection {
            backend,
            message: message.into(),
        }
    }

    pub fn query(backend: &'static str, message: impl Into<String>) -> Self {
        StorageError::Query {
            backend,
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Connection { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::Query { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_400() {
        let err = ApiError::Validation(vec![FieldError::new("quantity", "must be positive")]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_validation_error_display_lists_fields() {
        let err = ApiError::Validation(vec![
            FieldError::new("customerName", "is required"),
            FieldError::new("item", "is required"),
        ]);
        let display = err.to_string();
        assert!(display.contains("customerName"));
        assert!(display.contains("item"));
    }

    #[test]
    fn test_not_found_message_shape() {
        let id = Uuid::nil();
        let err = ApiError::NotFound { id };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_string(),
            format!("Order with id {} not found", id)
        );
    }

    #[test]
    fn test_storage_error_maps_to_500() {
        let err: ApiError = StorageError::query("postgres", "connection reset").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("postgres"));
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::connection("postgres", "refused");
        assert!(err.to_string().contains("Failed to connect"));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_internal_error_response_is_generic() {
        let err = ApiError::Internal("secret detail".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
