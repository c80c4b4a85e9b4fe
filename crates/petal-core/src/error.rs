//! # Errors
//!
//! ```text
//! ValidationError ──► CoreError ──► ApiError (studio, serialized for the UI)
//!                        ▲
//!        DbError ────────┘ as CoreError::Storage (petal-store)
//! ```
//!
//! ## Soft Failures
//! A placement that references a flower missing from the catalog is NOT an
//! error for pricing: it contributes zero. `UnknownComponent` is only raised
//! by operations that need the record itself (e.g. adding a stem by id).

use thiserror::Error;

use crate::checkout::FormErrors;

// =============================================================================
// Core Error
// =============================================================================

/// Why a studio operation was refused.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Quantity is zero or negative.
    ///
    /// ## When This Occurs
    /// - Simulated wholesale order quantity below 1 reached the pricing engine
    /// - A placement update carried a quantity below 1
    #[error("Invalid quantity {quantity}: must be at least 1")]
    InvalidQuantity { quantity: i64 },

    /// Flower id is not in the catalog.
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// Flower has no stock left.
    #[error("{name} is out of stock")]
    OutOfStock { id: String, name: String },

    /// Placement index does not exist in the composition.
    #[error("Placement {index} out of range (composition has {len})")]
    PlacementOutOfRange { index: usize, len: usize },

    /// Named designer preset does not exist.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// Operation needs at least one placement.
    #[error("Composition is empty")]
    EmptyComposition,

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart line not found.
    #[error("Cart item not found: {0}")]
    CartItemNotFound(String),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// A cart line would go past the per-line cap.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Catalog data could not be loaded.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Checkout form has failing fields.
    #[error("Order form has {} invalid field(s)", .0.len())]
    InvalidOrderForm(FormErrors),

    /// Settings store failed to load or save.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Composition could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Admin or form input broke a rule.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A rule broken by user or admin input, named by field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Empty or whitespace only.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Outside an inclusive numeric range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Referenced value does not exist.
    #[error("{field} references unknown value '{value}'")]
    UnknownReference { field: String, value: String },

    /// Duplicate value (e.g., two tiers on the same threshold).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::OutOfStock {
            id: "f1".to_string(),
            name: "Sarah Bernhardt Peony".to_string(),
        };
        assert_eq!(err.to_string(), "Sarah Bernhardt Peony is out of stock");

        let err = CoreError::InvalidQuantity { quantity: 0 };
        assert_eq!(err.to_string(), "Invalid quantity 0: must be at least 1");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Duplicate {
            field: "tier threshold".to_string(),
            value: "50".to_string(),
        };
        assert_eq!(err.to_string(), "tier threshold '50' already exists");

        let err = ValidationError::Required {
            field: "preset name".to_string(),
        };
        assert_eq!(err.to_string(), "preset name is required");
    }

    #[test]
    fn test_question_mark_lifts_validation() {
        fn check() -> CoreResult<()> {
            Err(ValidationError::MustBePositive {
                field: "multiplier".to_string(),
            })?
        }
        assert!(matches!(check(), Err(CoreError::Validation(_))));
    }
}
