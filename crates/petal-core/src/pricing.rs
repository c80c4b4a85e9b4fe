//! # Pricing Engine
//!
//! Computes what an end customer or bulk buyer pays for a composition.
//!
//! ## Pricing Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Price Calculation                              │
//! │                                                                         │
//! │  Composition                                                            │
//! │  ├── placement f1  ──► catalog ──► $12.50                               │
//! │  ├── placement f2  ──► catalog ──► $ 8.00                               │
//! │  ├── placement ??  ──► (missing) ─► $ 0.00   soft failure               │
//! │  └── wrap silk ────────────────► $15.00                                 │
//! │                                   ───────                               │
//! │                         base unit  $35.50   compute_base_price          │
//! │                                                                         │
//! │  WholesaleConfig (enabled)                                              │
//! │  ├── segment multiplier   × 0.85                                        │
//! │  ├── best tier (≤ qty)    × (1 − 20/100)                                │
//! │  └── round ONCE to cents ─► unit                                        │
//! │                             total = unit × simulated quantity           │
//! │                                              compute_wholesale_price    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quantity and the base price
//! Each placement counts as one stem in the per-unit base price. Placement
//! quantity is a canvas attribute; order quantity enters only at the
//! wholesale level through `simulated_quantity`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::ComponentLookup;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Composition;
use crate::wholesale::{WholesaleConfig, RETAIL_LABEL};

// =============================================================================
// Base Price
// =============================================================================

/// Sum of placement stem prices plus the wrap surcharge.
///
/// Placements referencing an id absent from `catalog` contribute zero.
pub fn compute_base_price<L>(composition: &Composition, catalog: &L) -> Money
where
    L: ComponentLookup + ?Sized,
{
    let stems: Money = composition
        .placements
        .iter()
        .filter_map(|p| catalog.component(&p.flower_id))
        .map(|f| f.price())
        .sum();

    stems + composition.wrap.surcharge()
}

// =============================================================================
// Wholesale Price
// =============================================================================

/// Result of applying wholesale settings to a base unit price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WholesaleQuote {
    /// Price per unit after discounts.
    pub unit: Money,
    /// `unit × quantity`.
    pub total: Money,
    /// Volume-tier discount applied, in percent.
    pub discount_percent: f64,
    /// Customer segment multiplier applied.
    pub multiplier: f64,
    /// Order quantity the total was computed for.
    pub quantity: i64,
}

impl WholesaleQuote {
    /// Quote leaving the base price unchanged.
    pub fn identity(base: Money) -> Self {
        WholesaleQuote {
            unit: base,
            total: base,
            discount_percent: 0.0,
            multiplier: 1.0,
            quantity: 1,
        }
    }

    /// Combined discount of multiplier and tier, in percent.
    ///
    /// Boutique (0.85) with a 20% tier reports 32%, since
    /// `0.85 × 0.80 = 0.68`.
    pub fn effective_discount_percent(&self) -> f64 {
        let factor = self.multiplier * (1.0 - self.discount_percent / 100.0);
        ((1.0 - factor) * 100.0 * 100.0).round() / 100.0
    }
}

/// Applies wholesale settings to a base unit price.
///
/// ## Rules
/// - Disabled config: identity quote (`unit == total == base`, 0%)
/// - Otherwise `unit = base × multiplier × (1 − tier%/100)` rounded once to
///   the cent, `total = unit × simulated_quantity`
/// - The tier used is the one with the greatest threshold not above the
///   simulated quantity; none qualifying means 0%
///
/// ## Errors
/// - `InvalidQuantity` if wholesale is enabled and `simulated_quantity < 1`
///
/// Multipliers in (0, 1] and discounts in [0, 100] are preconditions,
/// enforced when the configuration is edited.
pub fn compute_wholesale_price(base: Money, config: &WholesaleConfig) -> CoreResult<WholesaleQuote> {
    if !config.enabled {
        return Ok(WholesaleQuote::identity(base));
    }

    let quantity = config.simulated_quantity;
    if quantity < 1 {
        return Err(CoreError::InvalidQuantity { quantity });
    }

    let multiplier = config.active_multiplier();
    let discount_percent = config
        .applicable_tier(quantity)
        .map_or(0.0, |t| t.discount_percentage);

    let unit = base.scale(multiplier * (1.0 - discount_percent / 100.0));

    Ok(WholesaleQuote {
        unit,
        total: unit * quantity,
        discount_percent,
        multiplier,
        quantity,
    })
}

// =============================================================================
// Pricing Summary
// =============================================================================

/// Everything the builder's price panel shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingSummary {
    /// Retail price of one bouquet.
    pub unit_price: Money,
    /// Price of one bouquet for the active segment and tier.
    pub wholesale_unit_price: Money,
    /// Wholesale unit price × simulated quantity.
    pub total_order_price: Money,
    /// Volume-tier discount, in percent.
    pub discount_percent: f64,
    /// Combined multiplier and tier discount, in percent.
    pub effective_discount_percent: f64,
    /// Active segment label, "Retail" when none.
    pub multiplier_label: String,
    pub wholesale_enabled: bool,
    pub quantity: i64,
}

impl PricingSummary {
    /// Prices a composition against the catalog and wholesale settings.
    pub fn summarize<L>(
        composition: &Composition,
        catalog: &L,
        config: &WholesaleConfig,
    ) -> CoreResult<Self>
    where
        L: ComponentLookup + ?Sized,
    {
        let base = compute_base_price(composition, catalog);
        let quote = compute_wholesale_price(base, config)?;

        let multiplier_label = if config.enabled {
            config.segment_label().to_string()
        } else {
            RETAIL_LABEL.to_string()
        };

        Ok(PricingSummary {
            unit_price: base,
            wholesale_unit_price: quote.unit,
            total_order_price: quote.total,
            discount_percent: quote.discount_percent,
            effective_discount_percent: quote.effective_discount_percent(),
            multiplier_label,
            wholesale_enabled: config.enabled,
            quantity: quote.quantity,
        })
    }

    /// Amount a design goes into the cart at.
    ///
    /// Bulk orders are carted as one line at the full order total.
    pub fn checkout_amount(&self) -> Money {
        if self.wholesale_enabled {
            self.total_order_price
        } else {
            self.unit_price
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::{Placement, WrapStyle};
    use crate::wholesale::WholesaleTier;

    fn bouquet(ids: &[&str], wrap: WrapStyle) -> Composition {
        let mut composition = Composition::new();
        composition.wrap = wrap;
        for id in ids {
            composition.placements.push(Placement::new(*id));
        }
        composition
    }

    fn enabled(quantity: i64, segment: Option<&str>) -> WholesaleConfig {
        let mut config = WholesaleConfig {
            enabled: true,
            tiers: vec![
                WholesaleTier {
                    id: "t1".to_string(),
                    min_quantity: 25,
                    discount_percentage: 10.0,
                },
                WholesaleTier {
                    id: "t2".to_string(),
                    min_quantity: 50,
                    discount_percentage: 20.0,
                },
                WholesaleTier {
                    id: "t3".to_string(),
                    min_quantity: 100,
                    discount_percentage: 35.0,
                },
            ],
            simulated_quantity: quantity,
            ..Default::default()
        };
        config.select_segment(segment);
        config
    }

    #[test]
    fn test_base_price_is_additive() {
        let catalog = Catalog::standard().unwrap();
        let composition = bouquet(&["f1", "f2"], WrapStyle::Silk);
        assert_eq!(compute_base_price(&composition, &catalog).cents(), 3550);
    }

    #[test]
    fn test_base_price_ignores_placement_quantity() {
        let catalog = Catalog::standard().unwrap();
        let mut composition = bouquet(&["f1"], WrapStyle::HandTied);
        composition.placements[0].quantity = 5;
        assert_eq!(compute_base_price(&composition, &catalog).cents(), 1250);
    }

    #[test]
    fn test_unknown_component_contributes_zero() {
        let catalog = Catalog::standard().unwrap();
        let composition = bouquet(&["f1", "discontinued"], WrapStyle::Paper);
        assert_eq!(compute_base_price(&composition, &catalog).cents(), 1450);
    }

    #[test]
    fn test_base_price_over_slice_lookup() {
        let catalog = Catalog::standard().unwrap();
        let composition = bouquet(&["f2", "f2"], WrapStyle::HandTied);
        assert_eq!(compute_base_price(&composition, catalog.flowers()).cents(), 1600);
    }

    #[test]
    fn test_disabled_wholesale_is_identity() {
        let config = WholesaleConfig {
            enabled: false,
            simulated_quantity: 500,
            active_customer_type_id: Some("c1".to_string()),
            ..Default::default()
        };

        for cents in [0, 1, 3550, 99_999] {
            let base = Money::from_cents(cents);
            let quote = compute_wholesale_price(base, &config).unwrap();
            assert_eq!(quote.unit, base);
            assert_eq!(quote.total, base);
            assert_eq!(quote.discount_percent, 0.0);
        }
    }

    #[test]
    fn test_best_qualifying_tier_applies() {
        let base = Money::from_cents(1000);

        let quote = compute_wholesale_price(base, &enabled(60, None)).unwrap();
        assert_eq!(quote.discount_percent, 20.0);
        assert_eq!(quote.unit.cents(), 800);
        assert_eq!(quote.total.cents(), 48_000);

        let quote = compute_wholesale_price(base, &enabled(24, None)).unwrap();
        assert_eq!(quote.discount_percent, 0.0);
        assert_eq!(quote.unit, base);
        assert_eq!(quote.total.cents(), 24_000);
    }

    #[test]
    fn test_multiplier_and_tier_compose_multiplicatively() {
        let mut config = enabled(60, None);
        config.customer_multipliers[0].multiplier = 0.85;
        config.select_segment(Some("c1"));

        let quote = compute_wholesale_price(Money::from_cents(1000), &config).unwrap();
        assert_eq!(quote.unit.cents(), 680);
        assert_ne!(quote.unit.cents(), 650);
        assert_eq!(quote.effective_discount_percent(), 32.0);
    }

    #[test]
    fn test_non_positive_quantity_rejected_when_enabled() {
        let result = compute_wholesale_price(Money::from_cents(1000), &enabled(0, None));
        assert!(matches!(
            result,
            Err(CoreError::InvalidQuantity { quantity: 0 })
        ));
    }

    #[test]
    fn test_summary_uses_segment_label() {
        let catalog = Catalog::standard().unwrap();
        let composition = bouquet(&["f1", "f2"], WrapStyle::Silk);

        let summary =
            PricingSummary::summarize(&composition, &catalog, &enabled(50, Some("c3"))).unwrap();
        assert_eq!(summary.unit_price.cents(), 3550);
        // 3550 × 0.70 × 0.80 = 1988
        assert_eq!(summary.wholesale_unit_price.cents(), 1988);
        assert_eq!(summary.total_order_price.cents(), 99_400);
        assert_eq!(summary.multiplier_label, "Hotel Chain");
        assert_eq!(summary.checkout_amount(), summary.total_order_price);
    }

    #[test]
    fn test_summary_retail_when_disabled() {
        let catalog = Catalog::standard().unwrap();
        let composition = bouquet(&["f1"], WrapStyle::Paper);

        let summary =
            PricingSummary::summarize(&composition, &catalog, &WholesaleConfig::default())
                .unwrap();
        assert_eq!(summary.multiplier_label, "Retail");
        assert!(!summary.wholesale_enabled);
        assert_eq!(summary.checkout_amount().cents(), 1450);
    }
}
