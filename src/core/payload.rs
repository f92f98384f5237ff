//! Request payload validation
//!
//! Payloads are parsed from raw JSON into typed structs by validation
//! functions that collect every violated field before failing, so a response
//! can report all problems at once. Create and update payloads are strict:
//! fields outside the declared schema are rejected.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::order::OrderStatus;

/// Minimum length for free-text fields (customer name, item)
const MIN_TEXT_LEN: usize = 3;

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Payload types that can be validated from a raw JSON value.
///
/// Returns either the typed payload or the full list of field errors;
/// validation never partially applies.
pub trait ValidatePayload: Sized {
    fn validate(payload: &Value) -> Result<Self, Vec<FieldError>>;
}

/// Validated payload for creating an order.
///
/// `status` is required here; the store-level default only applies when a
/// row is inserted without an explicit status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub customer_name: String,
    pub item: String,
    pub quantity: i32,
    pub status: OrderStatus,
}

/// Validated payload for a partial order update.
///
/// Any subset of fields may be supplied; unset fields are left unchanged by
/// the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl UpdateOrder {
    /// True when no field was supplied; such an update is a no-op.
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.item.is_none()
            && self.quantity.is_none()
            && self.status.is_none()
    }
}

const ORDER_FIELDS: [&str; 4] = ["customerName", "item", "quantity", "status"];

impl ValidatePayload for CreateOrder {
    fn validate(payload: &Value) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let Some(map) = as_object(payload, &mut errors) else {
            return Err(errors);
        };

        reject_unknown_fields(map, &ORDER_FIELDS, &mut errors);

        let customer_name = required(map, "customerName", &mut errors, validate_text);
        let item = required(map, "item", &mut errors, validate_text);
        let quantity = required(map, "quantity", &mut errors, validate_quantity);
        let status = required(map, "status", &mut errors, validate_status);

        // Every field is Some exactly when no error was recorded for it
        match (customer_name, item, quantity, status) {
            (Some(customer_name), Some(item), Some(quantity), Some(status))
                if errors.is_empty() =>
            {
                Ok(CreateOrder {
                    customer_name,
                    item,
                    quantity,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

impl ValidatePayload for UpdateOrder {
    fn validate(payload: &Value) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let Some(map) = as_object(payload, &mut errors) else {
            return Err(errors);
        };

        reject_unknown_fields(map, &ORDER_FIELDS, &mut errors);

        let customer_name = optional(map, "customerName", &mut errors, validate_text);
        let item = optional(map, "item", &mut errors, validate_text);
        let quantity = optional(map, "quantity", &mut errors, validate_quantity);
        let status = optional(map, "status", &mut errors, validate_status);

        if errors.is_empty() {
            Ok(UpdateOrder {
                customer_name,
                item,
                quantity,
                status,
            })
        } else {
            Err(errors)
        }
    }
}

fn as_object<'a>(payload: &'a Value, errors: &mut Vec<FieldError>) -> Option<&'a Map<String, Value>> {
    match payload.as_object() {
        Some(map) => Some(map),
        None => {
            errors.push(FieldError::new("body", "must be a JSON object"));
            None
        }
    }
}

fn reject_unknown_fields(map: &Map<String, Value>, allowed: &[&str], errors: &mut Vec<FieldError>) {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            errors.push(FieldError::new(key.clone(), "unknown field"));
        }
    }
}

fn required<T>(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
    check: impl Fn(&Value) -> Result<T, String>,
) -> Option<T> {
    match map.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
        Some(value) => match check(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                errors.push(FieldError::new(field, message));
                None
            }
        },
    }
}

fn optional<T>(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut Vec<FieldError>,
    check: impl Fn(&Value) -> Result<T, String>,
) -> Option<T> {
    match map.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => match check(value) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                errors.push(FieldError::new(field, message));
                None
            }
        },
    }
}

/// Trim surrounding whitespace and enforce the minimum length.
fn validate_text(value: &Value) -> Result<String, String> {
    let Some(raw) = value.as_str() else {
        return Err("must be a string".to_string());
    };
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_TEXT_LEN {
        return Err(format!("must have at least {} characters", MIN_TEXT_LEN));
    }
    Ok(trimmed.to_string())
}

/// Coerce a JSON number or numeric string into a positive integer.
///
/// Fractional values are rejected; query strings and lenient clients send
/// quantities as text, which is accepted.
fn validate_quantity(value: &Value) -> Result<i32, String> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n >= 1 && n <= i32::MAX as i64 => Ok(n as i32),
        _ => Err("must be a positive integer".to_string()),
    }
}

fn validate_status(value: &Value) -> Result<OrderStatus, String> {
    value
        .as_str()
        .and_then(|s| s.parse::<OrderStatus>().ok())
        .ok_or_else(|| "must be one of PENDING, COMPLETED, CANCELLED".to_string())
}
