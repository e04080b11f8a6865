//! Typed error handling for hemobank
//!
//! The error hierarchy lets callers handle failures specifically instead of
//! dealing with a generic `anyhow::Error`:
//!
//! - [`EntityError`]: CRUD failures (missing records, restricted deletes)
//! - [`LedgerError`]: inventory business-rule rejections
//! - [`ValidationError`]: bad input detected before any write
//! - [`ConfigError`]: configuration parsing failures
//! - [`StorageError`]: store-level failures
//!
//! Every error maps to an HTTP status and a stable machine-readable code, and
//! renders as an [`ErrorResponse`] JSON body. Nothing is retried: a rejection
//! is a definitive refusal, and every failure aborts before or during the
//! atomic write, leaving no partial state.

use crate::core::blood_type::BloodType;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for hemobank operations
#[derive(Debug, Error)]
pub enum HemoError {
    /// Entity-related errors (CRUD operations)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Inventory ledger rejections
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage errors
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl HemoError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HemoError::Entity(e) => e.status_code(),
            HemoError::Ledger(e) => e.status_code(),
            HemoError::Validation(_) => StatusCode::BAD_REQUEST,
            HemoError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HemoError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            HemoError::Entity(e) => e.error_code(),
            HemoError::Ledger(e) => e.error_code(),
            HemoError::Validation(e) => e.error_code(),
            HemoError::Config(_) => "CONFIG_ERROR",
            HemoError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            HemoError::Entity(EntityError::NotFound { resource, id }) => {
                Some(serde_json::json!({
                    "resource": resource,
                    "id": id.to_string(),
                }))
            }
            HemoError::Entity(EntityError::ConstraintViolation {
                resource,
                id,
                dependents,
                ..
            }) => Some(serde_json::json!({
                "resource": resource,
                "id": id.to_string(),
                "dependents": dependents,
            })),
            HemoError::Ledger(LedgerError::StockNotFound {
                blood_bank_id,
                blood_type,
            }) => Some(serde_json::json!({
                "blood_bank_id": blood_bank_id.to_string(),
                "blood_type": blood_type,
            })),
            HemoError::Ledger(LedgerError::InsufficientStock {
                blood_bank_id,
                blood_type,
                available,
                requested,
            }) => Some(serde_json::json!({
                "blood_bank_id": blood_bank_id.to_string(),
                "blood_type": blood_type,
                "available": available,
                "requested": requested,
            })),
            HemoError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for HemoError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity CRUD operations
#[derive(Debug, Error)]
pub enum EntityError {
    /// Record was not found
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: &'static str, id: Uuid },

    /// A delete or update was rejected because dependent records reference
    /// the target (restrict policy; repeat with cascade to override deletes)
    #[error("cannot {operation} {resource} '{id}': {dependents} dependent record(s) still reference it")]
    ConstraintViolation {
        resource: &'static str,
        id: Uuid,
        operation: &'static str,
        dependents: usize,
    },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::ConstraintViolation { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "NOT_FOUND",
            EntityError::ConstraintViolation { .. } => "CONSTRAINT_VIOLATION",
        }
    }
}

// =============================================================================
// Ledger Errors
// =============================================================================

/// Business-rule rejections from the inventory ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No stock row exists for the (blood bank, blood type) pair
    #[error("no {blood_type} stock recorded at blood bank '{blood_bank_id}'")]
    StockNotFound {
        blood_bank_id: Uuid,
        blood_type: BloodType,
    },

    /// The requested withdrawal exceeds the available stock
    #[error(
        "insufficient {blood_type} stock at blood bank '{blood_bank_id}': {available} available, {requested} requested"
    )]
    InsufficientStock {
        blood_bank_id: Uuid,
        blood_type: BloodType,
        available: Decimal,
        requested: Decimal,
    },
}

impl LedgerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::StockNotFound { .. } => StatusCode::NOT_FOUND,
            LedgerError::InsufficientStock { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            LedgerError::StockNotFound { .. } => "STOCK_NOT_FOUND",
            LedgerError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors detected on input before any write occurs
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A single field failed a domain check
    #[error("invalid value for '{field}': {message}")]
    InvalidInput { field: &'static str, message: String },

    /// One or more payload fields failed validation
    #[error("validation failed: {}", format_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation failure
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn format_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidInput { .. } => "INVALID_INPUT",
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for HemoError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        HemoError::Validation(ValidationError::FieldErrors(fields))
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{f}'")).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors surfaced by the entity store itself
#[derive(Debug, Error)]
pub enum StorageError {
    /// A lock was poisoned by a panicking writer
    #[error("failed to acquire store lock: {message}")]
    LockPoisoned { message: String },
}

/// A specialized Result type for hemobank operations
pub type HemoResult<T> = Result<T, HemoError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_not_found_display_and_status() {
        let err = EntityError::NotFound {
            resource: "donor",
            id: Uuid::nil(),
        };
        assert!(err.to_string().contains("donor"));
        assert!(err.to_string().contains("not found"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_insufficient_stock_is_conflict() {
        let err = LedgerError::InsufficientStock {
            blood_bank_id: Uuid::nil(),
            blood_type: BloodType::OPositive,
            available: dec!(3),
            requested: dec!(5),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "INSUFFICIENT_STOCK");
        assert!(err.to_string().contains("O+"));
    }

    #[test]
    fn test_error_response_serialization() {
        let err = HemoError::Ledger(LedgerError::InsufficientStock {
            blood_bank_id: Uuid::nil(),
            blood_type: BloodType::ANegative,
            available: dec!(1.5),
            requested: dec!(2),
        });
        let response = err.to_response();
        assert_eq!(response.code, "INSUFFICIENT_STOCK");
        let details = response.details.unwrap();
        assert_eq!(details["blood_type"], "A-");
    }

    #[test]
    fn test_constraint_violation_details() {
        let err = HemoError::Entity(EntityError::ConstraintViolation {
            resource: "donor",
            id: Uuid::nil(),
            operation: "delete",
            dependents: 2,
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_response().details.unwrap()["dependents"], 2);
    }

    #[test]
    fn test_invalid_input_is_bad_request() {
        let err: HemoError = ValidationError::InvalidInput {
            field: "quantity",
            message: "must be positive".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_from_validator_errors() {
        use validator::Validate;

        #[derive(Validate)]
        struct Payload {
            #[validate(length(min = 1))]
            name: String,
        }

        let err: HemoError = Payload {
            name: String::new(),
        }
        .validate()
        .unwrap_err()
        .into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_response().details.unwrap()["fields"].is_array());
    }
}
