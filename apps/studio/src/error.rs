//! # Studio Error Type
//!
//! Error type returned by every studio command.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  petal-core (CoreError / ValidationError)                              │
//! │       │                                                                 │
//! │       │  From<CoreError> for ApiError                                   │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  ApiError { code, message, fields }                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       ▲                                                                 │
//! │       │  From<DbError> for ApiError                                     │
//! │       │                                                                 │
//! │  petal-store (DbError)                                                 │
//! │                                                                         │
//! │  Serialized for the UI as:                                              │
//! │  { "code": "VALIDATION_ERROR", "message": "...", "fields": {...} }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage and internal failures are logged with their detail and surfaced
//! with a generic message.

use serde::Serialize;
use thiserror::Error;

use petal_core::checkout::FormErrors;
use petal_core::{CoreError, ValidationError};
use petal_store::DbError;

/// Error returned to the UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable code for UI branching.
    pub code: ErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Per-field messages when an order form was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FormErrors>,
}

/// Error codes for UI handling.
///
/// ## UI Handling
/// ```typescript
/// switch (e.code) {
///   case 'OUT_OF_STOCK':
///     toast(e.message);
///     break;
///   case 'VALIDATION_ERROR':
///     highlightFields(e.fields);
///     break;
///   default:
///     toast('Something went wrong');
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Flower, preset or cart line not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Settings store failed
    DatabaseError,

    /// Request is well-formed but not allowed right now
    BusinessLogic,

    /// Unexpected failure
    Internal,

    /// Cart operation failed
    CartError,

    /// Flower has no stock left
    OutOfStock,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: None,
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    /// A state lock was poisoned by a panicking command.
    pub fn poisoned(state: &str) -> Self {
        tracing::error!(state, "State lock poisoned");
        ApiError::internal(format!("{} state is unavailable", state))
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Settings database is unavailable")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Settings database needs repair")
            }
            DbError::QueryFailed(e) => {
                tracing::error!(error = %e, "Settings query failed");
                ApiError::new(ErrorCode::DatabaseError, "Settings could not be read or saved")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Settings database is busy")
            }
            DbError::Serialization(e) => {
                tracing::error!(error = %e, "Stored setting could not be encoded");
                ApiError::new(ErrorCode::DatabaseError, "Saved settings are unreadable")
            }
            DbError::Internal(e) => {
                tracing::error!(error = %e, "Settings store failed");
                ApiError::new(ErrorCode::DatabaseError, "Settings could not be read or saved")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidQuantity { quantity } => ApiError::validation(format!(
                "Invalid quantity {}: must be at least 1",
                quantity
            )),
            CoreError::UnknownComponent(id) => ApiError::not_found("Flower", &id),
            CoreError::OutOfStock { name, .. } => {
                ApiError::new(ErrorCode::OutOfStock, format!("{} is out of stock", name))
            }
            e @ CoreError::PlacementOutOfRange { .. } => ApiError::validation(e.to_string()),
            CoreError::UnknownPreset(name) => ApiError::not_found("Preset", &name),
            CoreError::EmptyComposition => ApiError::new(
                ErrorCode::BusinessLogic,
                "Add at least one flower to the design first",
            ),
            CoreError::EmptyCart => ApiError::cart("Cart is empty"),
            CoreError::CartItemNotFound(id) => ApiError::not_found("Cart item", &id),
            CoreError::CartTooLarge { max } => {
                ApiError::cart(format!("Cart cannot have more than {} items", max))
            }
            CoreError::QuantityTooLarge { requested, max } => ApiError::validation(format!(
                "Quantity {} exceeds maximum allowed ({})",
                requested, max
            )),
            CoreError::InvalidCatalog(e) => {
                tracing::error!(error = %e, "Catalog failed to load");
                ApiError::internal("Catalog is unavailable")
            }
            CoreError::InvalidOrderForm(fields) => ApiError {
                code: ErrorCode::ValidationError,
                message: fields.to_string(),
                fields: Some(fields),
            },
            CoreError::Storage(e) => {
                tracing::error!(error = %e, "Wholesale settings store failed");
                ApiError::new(ErrorCode::DatabaseError, "Settings could not be saved")
            }
            CoreError::Serialization(e) => {
                tracing::error!(error = %e, "Design serialization failed");
                ApiError::internal("Design could not be exported")
            }
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Startup Error
// =============================================================================

/// Failures while opening the studio.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Could not create data directory: {0}")]
    DataDir(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
