//! # Validation Module
//!
//! Input rules shared by catalog loading, admin edits and checkout.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                │
//! │  ├── Input coercion (quantity fields clamp to ≥ 1)                     │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Studio commands / core sessions                              │
//! │  └── THIS MODULE: catalog records, admin edits, checkout fields        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Assumes well-formed configuration (preconditions only)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use petal_core::validation::{validate_email, validate_quantity};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_email("iris@petalprose.com").is_ok());
//! assert!(validate_email("iris@petalprose").is_err());
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::Flower;
use crate::wholesale::WholesaleConfig;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a field has non-whitespace content.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Shape `local@domain.tld`: no whitespace, one `@`, a dot in the domain
///   with text on both sides
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required("email", email)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@example.com".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}

/// Validates the name of a saved preset.
pub fn validate_preset_name(name: &str) -> ValidationResult<()> {
    validate_required("preset name", name)?;

    if name.trim().chars().count() > 80 {
        return Err(ValidationError::TooLong {
            field: "preset name".to_string(),
            max: 80,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// A stem or cart quantity lies in `1..=MAX_ITEM_QUANTITY`.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1.0,
            max: MAX_ITEM_QUANTITY as f64,
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0.0,
            max: i64::MAX as f64,
        });
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a catalog record at load time.
///
/// ## Rules
/// - id and name present
/// - price and stock non-negative
pub fn validate_flower(flower: &Flower) -> ValidationResult<()> {
    validate_required("flower id", &flower.id)?;
    validate_required("flower name", &flower.name)?;
    validate_price_cents(flower.price_cents)?;

    if flower.stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: format!("stock of {}", flower.id),
            min: 0.0,
            max: i64::MAX as f64,
        });
    }

    Ok(())
}

/// Validates a wholesale configuration after an administrative edit.
///
/// ## Rules
/// ```text
/// tiers       thresholds ≥ 0 and unique, discount in [0, 100], ids unique
/// segments    multiplier in (0, 1], label present, ids unique
/// selection   active segment id (if any) must exist
/// quantity    simulated order quantity ≥ 1
/// ```
///
/// Unique thresholds make tier selection unambiguous: the pricing engine
/// picks the greatest qualifying threshold and never has to break a tie.
pub fn validate_wholesale_config(config: &WholesaleConfig) -> ValidationResult<()> {
    let mut tier_ids = HashSet::new();
    let mut thresholds = HashSet::new();

    for tier in &config.tiers {
        if !tier_ids.insert(tier.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "tier id".to_string(),
                value: tier.id.clone(),
            });
        }

        if tier.min_quantity < 0 {
            return Err(ValidationError::OutOfRange {
                field: "tier threshold".to_string(),
                min: 0.0,
                max: i64::MAX as f64,
            });
        }

        if !thresholds.insert(tier.min_quantity) {
            return Err(ValidationError::Duplicate {
                field: "tier threshold".to_string(),
                value: tier.min_quantity.to_string(),
            });
        }

        if !(0.0..=100.0).contains(&tier.discount_percentage) {
            return Err(ValidationError::OutOfRange {
                field: "tier discount".to_string(),
                min: 0.0,
                max: 100.0,
            });
        }
    }

    let mut segment_ids = HashSet::new();
    for segment in &config.customer_multipliers {
        if !segment_ids.insert(segment.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "segment id".to_string(),
                value: segment.id.clone(),
            });
        }

        validate_required("segment label", &segment.label)?;

        if !(segment.multiplier > 0.0 && segment.multiplier <= 1.0) {
            return Err(ValidationError::OutOfRange {
                field: format!("multiplier of {}", segment.label),
                min: 0.0,
                max: 1.0,
            });
        }
    }

    if let Some(active) = &config.active_customer_type_id {
        if !segment_ids.contains(active.as_str()) {
            return Err(ValidationError::UnknownReference {
                field: "active segment".to_string(),
                value: active.clone(),
            });
        }
    }

    if config.simulated_quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "simulated quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wholesale::{CustomerMultiplier, WholesaleTier};

    #[test]
    fn test_validate_email() {
        assert!(validate_email("iris@petalprose.com").is_ok());
        assert!(validate_email("a.b@c.co.uk").is_ok());

        assert!(matches!(
            validate_email("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_email("iris").is_err());
        assert!(validate_email("iris@petalprose").is_err());
        assert!(validate_email("@petalprose.com").is_err());
        assert!(validate_email("iris@.com").is_err());
        assert!(validate_email("iris@petalprose.").is_err());
        assert!(validate_email("ir is@petalprose.com").is_err());
        assert!(validate_email("iris@@petalprose.com").is_err());
    }

    #[test]
    fn test_quantity_bounds() {
        for ok in [1, 60, MAX_ITEM_QUANTITY] {
            assert!(validate_quantity(ok).is_ok(), "{ok} should pass");
        }
        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity(MAX_ITEM_QUANTITY + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_preset_name() {
        assert!(validate_preset_name("Spring Wedding").is_ok());
        assert!(validate_preset_name("  ").is_err());
        assert!(validate_preset_name(&"x".repeat(81)).is_err());
    }

    #[test]
    fn test_default_wholesale_config_is_valid() {
        assert!(validate_wholesale_config(&WholesaleConfig::default()).is_ok());
    }

    #[test]
    fn test_duplicate_tier_threshold_rejected() {
        let mut config = WholesaleConfig::default();
        config.tiers.push(WholesaleTier {
            id: "t3".to_string(),
            min_quantity: 50,
            discount_percentage: 25.0,
        });

        assert_eq!(
            validate_wholesale_config(&config),
            Err(ValidationError::Duplicate {
                field: "tier threshold".to_string(),
                value: "50".to_string(),
            })
        );
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let mut config = WholesaleConfig::default();
        config.tiers[0].discount_percentage = 120.0;
        assert!(validate_wholesale_config(&config).is_err());

        let mut config = WholesaleConfig::default();
        config.customer_multipliers.push(CustomerMultiplier {
            id: "c9".to_string(),
            label: "Free".to_string(),
            multiplier: 0.0,
        });
        assert!(validate_wholesale_config(&config).is_err());

        let mut config = WholesaleConfig::default();
        config.simulated_quantity = 0;
        assert!(validate_wholesale_config(&config).is_err());
    }

    #[test]
    fn test_dangling_active_segment_rejected() {
        let mut config = WholesaleConfig::default();
        config.active_customer_type_id = Some("missing".to_string());
        assert!(matches!(
            validate_wholesale_config(&config),
            Err(ValidationError::UnknownReference { .. })
        ));
    }
}
