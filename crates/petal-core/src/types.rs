//! # Domain Types
//!
//! Core domain types used throughout the studio.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌──────────────────────────────────┐       │
//! │  │    Flower       │        │          Composition             │       │
//! │  │  ─────────────  │        │  ──────────────────────────────  │       │
//! │  │  id             │◄───────│  placements: Vec<Placement>      │       │
//! │  │  name           │ by id  │    (order = paint order)         │       │
//! │  │  price_cents    │        │  wrap: WrapStyle                 │       │
//! │  │  category       │        │  ribbon_color                    │       │
//! │  │  stock          │        └──────────────────────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ FlowerCategory  │   │   WrapStyle     │   │   LayerMove     │       │
//! │  │  Focal          │   │  Paper  $2.00   │   │  Front          │       │
//! │  │  Filler         │   │  Burlap $4.50   │   │  Back           │       │
//! │  │  Greenery       │   │  Silk  $15.00   │   │  Forward        │       │
//! │  │  Accent         │   │  ...            │   │  Backward       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Flower Category
// =============================================================================

/// Role a stem plays in an arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum FlowerCategory {
    /// Statement blooms that anchor the arrangement.
    Focal,
    /// Texture and volume builders.
    Filler,
    /// Structure and organic movement.
    Greenery,
    /// Textural surprises and dried elements.
    Accent,
}

impl FlowerCategory {
    /// All categories in catalog display order.
    pub const ALL: [FlowerCategory; 4] = [
        FlowerCategory::Focal,
        FlowerCategory::Filler,
        FlowerCategory::Greenery,
        FlowerCategory::Accent,
    ];

    /// Label shown on the catalog tabs.
    pub fn label(&self) -> &'static str {
        match self {
            FlowerCategory::Focal => "Bloom",
            FlowerCategory::Filler => "Filler",
            FlowerCategory::Greenery => "Greenery",
            FlowerCategory::Accent => "Accent",
        }
    }
}

impl fmt::Display for FlowerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Flower
// =============================================================================

/// A catalog entry. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Flower {
    /// Catalog identifier (e.g. "f1").
    pub id: String,

    /// Display name.
    pub name: String,

    /// Botanical name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,

    /// Price per stem in cents.
    pub price_cents: i64,

    /// Role in an arrangement.
    pub category: FlowerCategory,

    /// Colour description.
    pub color: String,

    /// Traditional meaning of the stem.
    pub meaning: String,

    /// Stems available.
    pub stock: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub care_instructions: Option<String>,

    /// Design style tag (Romantic, Modern, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl Flower {
    /// Returns the stem price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks if at least one stem is available.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Wrap Style
// =============================================================================

/// Packaging option with a fixed surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum WrapStyle {
    #[default]
    Paper,
    Burlap,
    Silk,
    Jute,
    Organza,
    /// Hand-tied, no wrap.
    #[serde(rename = "none")]
    HandTied,
}

impl WrapStyle {
    /// All wrap styles in the order the studio lists them.
    pub const ALL: [WrapStyle; 6] = [
        WrapStyle::Paper,
        WrapStyle::Burlap,
        WrapStyle::Silk,
        WrapStyle::Jute,
        WrapStyle::Organza,
        WrapStyle::HandTied,
    ];

    /// Fixed surcharge added to the bouquet's base price.
    pub const fn surcharge(&self) -> Money {
        match self {
            WrapStyle::Paper => Money::from_cents(200),
            WrapStyle::Burlap => Money::from_cents(450),
            WrapStyle::Silk => Money::from_cents(1500),
            WrapStyle::Jute => Money::from_cents(300),
            WrapStyle::Organza => Money::from_cents(600),
            WrapStyle::HandTied => Money::zero(),
        }
    }

    /// Storefront name of the wrap.
    pub fn display_name(&self) -> &'static str {
        match self {
            WrapStyle::Paper => "Kraft Paper",
            WrapStyle::Burlap => "Rustic Burlap",
            WrapStyle::Silk => "Italian Silk",
            WrapStyle::Jute => "Eco Jute",
            WrapStyle::Organza => "Sheer Organza",
            WrapStyle::HandTied => "Hand-Tied",
        }
    }

    /// Identifier used in persisted compositions.
    pub fn id(&self) -> &'static str {
        match self {
            WrapStyle::Paper => "paper",
            WrapStyle::Burlap => "burlap",
            WrapStyle::Silk => "silk",
            WrapStyle::Jute => "jute",
            WrapStyle::Organza => "organza",
            WrapStyle::HandTied => "none",
        }
    }
}

// =============================================================================
// Placement
// =============================================================================

/// Canvas position in percent of the canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

impl Default for Position {
    /// Upper-centre of the canvas, where new stems land.
    fn default() -> Self {
        Position { x: 50.0, y: 40.0 }
    }
}

/// One stem instance positioned within a composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Catalog id of the stem.
    pub flower_id: String,

    /// Positive quantity, 1 unless edited.
    pub quantity: i64,

    pub position: Position,

    /// Rotation in degrees.
    pub rotation: f64,

    /// Scale factor, 1.0 is natural size.
    pub scale: f64,
}

impl Placement {
    /// Creates a placement of one stem at the default position.
    pub fn new(flower_id: impl Into<String>) -> Self {
        Placement {
            flower_id: flower_id.into(),
            quantity: 1,
            position: Position::default(),
            rotation: 0.0,
            scale: 1.0,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn scaled(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Partial update of a placement. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlacementUpdate {
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub scale: Option<f64>,
}

impl PlacementUpdate {
    /// Applies the update to a placement.
    ///
    /// Quantity is validated by the caller.
    pub fn apply_to(&self, placement: &mut Placement) {
        if let Some(quantity) = self.quantity {
            placement.quantity = quantity;
        }
        if let Some(position) = self.position {
            placement.position = position;
        }
        if let Some(rotation) = self.rotation {
            placement.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            placement.scale = scale;
        }
    }
}

/// Paint-order change for a selected placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LayerMove {
    /// Paint last (on top of everything).
    Front,
    /// Paint first (behind everything).
    Back,
    /// Swap with the next placement.
    Forward,
    /// Swap with the previous placement.
    Backward,
}

// =============================================================================
// Composition
// =============================================================================

/// Default ribbon colour of a fresh composition.
pub const DEFAULT_RIBBON_COLOR: &str = "#f472b6";

/// The bouquet being designed.
///
/// ## Invariant
/// Placement order is paint order. Two placements may reference the same
/// flower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    pub placements: Vec<Placement>,
    pub wrap: WrapStyle,
    pub ribbon_color: String,
}

impl Composition {
    /// Creates an empty composition in kraft paper with a pink ribbon.
    pub fn new() -> Self {
        Composition {
            placements: Vec::new(),
            wrap: WrapStyle::default(),
            ribbon_color: DEFAULT_RIBBON_COLOR.to_string(),
        }
    }

    /// Checks if no stems have been placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of placements on the canvas.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Sum of placement quantities.
    pub fn stem_count(&self) -> i64 {
        self.placements.iter().map(|p| p.quantity).sum()
    }
}

impl Default for Composition {
    fn default() -> Self {
        Composition::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_surcharges() {
        assert_eq!(WrapStyle::Silk.surcharge().cents(), 1500);
        assert_eq!(WrapStyle::Burlap.surcharge().cents(), 450);
        assert!(WrapStyle::HandTied.surcharge().is_zero());
        assert_eq!(WrapStyle::default(), WrapStyle::Paper);
    }

    #[test]
    fn test_wrap_serializes_with_storefront_ids() {
        for wrap in WrapStyle::ALL {
            let json = serde_json::to_string(&wrap).unwrap();
            assert_eq!(json, format!("\"{}\"", wrap.id()));
        }
        let parsed: WrapStyle = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(parsed, WrapStyle::HandTied);
    }

    #[test]
    fn test_new_composition() {
        let composition = Composition::new();
        assert!(composition.is_empty());
        assert_eq!(composition.wrap, WrapStyle::Paper);
        assert_eq!(composition.ribbon_color, DEFAULT_RIBBON_COLOR);
    }

    #[test]
    fn test_placement_update_only_touches_given_fields() {
        let mut placement = Placement::new("f1").rotated(15.0);
        PlacementUpdate {
            scale: Some(1.2),
            ..Default::default()
        }
        .apply_to(&mut placement);

        assert_eq!(placement.scale, 1.2);
        assert_eq!(placement.rotation, 15.0);
        assert_eq!(placement.quantity, 1);
    }

    #[test]
    fn test_stem_count() {
        let mut composition = Composition::new();
        composition.placements.push(Placement::new("f1").with_quantity(3));
        composition.placements.push(Placement::new("f2"));
        assert_eq!(composition.len(), 2);
        assert_eq!(composition.stem_count(), 4);
    }
}
