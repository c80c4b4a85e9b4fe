//! # petal-core: Pure Business Logic for the Petal & Prose Studio
//!
//! This crate is the **heart** of the studio. It contains the bouquet pricing
//! engine, the undo/redo history of the design canvas, and the cart and
//! checkout rules, all as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Petal & Prose Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI (browser)                      │   │
//! │  │   Catalog ──► Bouquet Canvas ──► Cart ──► Checkout              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Studio Commands (apps/studio)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ petal-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌───────────┐ ┌──────────────────┐ │   │
//! │  │   │ catalog  │ │ pricing  │ │ history   │ │ cart / checkout  │ │   │
//! │  │   │ Flower   │ │ base     │ │ undo/redo │ │ order form rules │ │   │
//! │  │   │ WrapStyle│ │ wholesale│ │ 30 steps  │ │ delivery fees    │ │   │
//! │  │   └──────────┘ └──────────┘ └───────────┘ └──────────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   stems in, cents out; storage arrives through traits          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 petal-store (Settings Layer)                    │   │
//! │  │            SQLite key-value settings, saved presets             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Composition, placements, wrap styles, flowers
//! - [`catalog`] - The stem catalog and id lookups
//! - [`presets`] - Designer presets and user-saved collections
//! - [`money`] - Money type with integer arithmetic
//! - [`pricing`] - Base price and wholesale price calculation
//! - [`wholesale`] - Wholesale configuration and its settings store
//! - [`history`] - Bounded linear undo/redo buffer
//! - [`builder`] - The bouquet builder session
//! - [`cart`] / [`checkout`] - Cart math and order form rules
//! - [`advisor`] - Contract of the generative-AI design advisor
//! - [`error`] / [`validation`] - Domain errors and input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use petal_core::{compute_base_price, compute_wholesale_price};
//! use petal_core::{Catalog, Composition, Placement, WholesaleConfig, WrapStyle};
//!
//! let catalog = Catalog::standard().unwrap();
//! let mut bouquet = Composition::new();
//! bouquet.placements.push(Placement::new("f1")); // peony, $12.50
//! bouquet.placements.push(Placement::new("f2")); // rose, $8.00
//! bouquet.wrap = WrapStyle::Silk;                  // $15.00
//!
//! let base = compute_base_price(&bouquet, &catalog);
//! assert_eq!(base.cents(), 3550);
//!
//! let quote = compute_wholesale_price(base, &WholesaleConfig::default()).unwrap();
//! assert_eq!(quote.unit, base); // wholesale disabled by default
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod advisor;
pub mod builder;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod history;
pub mod money;
pub mod presets;
pub mod pricing;
pub mod types;
pub mod validation;
pub mod wholesale;

// =============================================================================
// Public Surface
// =============================================================================

pub use builder::BouquetBuilder;
pub use cart::{Cart, CartItem, CartItemKind};
pub use catalog::{Catalog, ComponentLookup};
pub use error::{CoreError, CoreResult, ValidationError};
pub use history::EditHistory;
pub use money::Money;
pub use presets::UserPreset;
pub use pricing::{compute_base_price, compute_wholesale_price, PricingSummary, WholesaleQuote};
pub use types::*;
pub use wholesale::{
    ConfigStore, CustomerMultiplier, MemoryConfigStore, WholesaleConfig, WholesaleManager,
    WholesaleTier,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of canvas states kept by the undo/redo history.
pub const HISTORY_CAPACITY: usize = 30;

/// Maximum lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single cart line or placement.
pub const MAX_ITEM_QUANTITY: i64 = 999;
