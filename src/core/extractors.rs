//! Axum extractors that validate requests before handlers run
//!
//! Each extractor short-circuits with the appropriate error response, so a
//! handler is never invoked with an invalid payload, query, or identifier.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

use crate::core::error::ApiError;
use crate::core::payload::{FieldError, ValidatePayload};
use crate::core::query::ListQuery;

/// Extractor that parses the request body through a payload validator.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_order(
///     Validated(payload): Validated<CreateOrder>,
/// ) -> Result<Json<Order>, ApiError> {
///     // payload is already validated
/// }
/// ```
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatePayload,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = match Json::from_request(req, state).await {
            Ok(json) => json,
            Err(e) => {
                return Err(ApiError::Validation(vec![FieldError::new(
                    "body",
                    format!("invalid JSON: {}", e),
                )])
                .into_response());
            }
        };

        match T::validate(&payload) {
            Ok(parsed) => Ok(Validated(parsed)),
            Err(errors) => Err(ApiError::Validation(errors).into_response()),
        }
    }
}

/// Extractor for the order identifier path segment.
///
/// The id must match the UUID format the store produces; anything else is
/// rejected before a persistence call is attempted.
pub struct OrderId(pub Uuid);

impl<S> FromRequestParts<S> for OrderId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(vec![FieldError::new("id", "missing order id")])
                    .into_response()
            })?;

        Uuid::parse_str(&raw).map(OrderId).map_err(|_| {
            ApiError::Validation(vec![FieldError::new("id", "must be a valid UUID")])
                .into_response()
        })
    }
}

/// Extractor for validated list query parameters.
pub struct ListParams(pub ListQuery);

impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::Validation(vec![FieldError::new(
                    "query",
                    format!("invalid query string: {}", e),
                )])
                .into_response()
            })?;

        ListQuery::from_params(&params)
            .map(ListParams)
            .map_err(|errors| ApiError::Validation(errors).into_response())
    }
}
