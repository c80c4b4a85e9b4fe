//! # Cart
//!
//! The shopping cart: ready-made stems by the bunch and bespoke designs
//! from the builder.
//!
//! ## Line Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_ready_made(flower, qty)                                            │
//! │    same flower already in cart ──► quantity += qty (merge)              │
//! │    otherwise ───────────────────► new line                              │
//! │                                                                         │
//! │  add_custom(composition, price)                                         │
//! │    always a new line, quantity 1, composition frozen on the line        │
//! │                                                                         │
//! │  update_quantity(id, 0) ────────► line removed                          │
//! │                                                                         │
//! │  Limits: MAX_CART_ITEMS lines, MAX_ITEM_QUANTITY per line               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are frozen when a line is added: a later catalog or wholesale change
//! does not reprice what is already in the cart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Composition, Flower};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Display name of a line built in the studio.
pub const CUSTOM_ITEM_NAME: &str = "Bespoke Arrangement";

/// What a cart line holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum CartItemKind {
    /// Stems straight from the catalog.
    ReadyMade,
    /// A composition designed in the builder.
    Custom,
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Flower id for ready-made lines, `custom-<uuid>` for designs.
    pub id: String,

    /// Name at time of adding (frozen).
    pub name: String,

    /// Price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    pub quantity: i64,

    pub kind: CartItemKind,

    /// The design, for custom lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<Composition>,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Ready-made lines are unique by flower id
/// - Every quantity is in 1..=MAX_ITEM_QUANTITY
/// - At most MAX_CART_ITEMS lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a designed bouquet as its own line and returns the line id.
    pub fn add_custom(&mut self, composition: Composition, price: Money) -> CoreResult<String> {
        if composition.is_empty() {
            return Err(CoreError::EmptyComposition);
        }
        self.check_room()?;

        let id = format!("custom-{}", Uuid::new_v4());
        self.items.push(CartItem {
            id: id.clone(),
            name: CUSTOM_ITEM_NAME.to_string(),
            unit_price_cents: price.cents(),
            quantity: 1,
            kind: CartItemKind::Custom,
            composition: Some(composition),
            added_at: Utc::now(),
        });
        Ok(id)
    }

    /// Adds stems of a catalog flower, merging with an existing line.
    pub fn add_ready_made(&mut self, flower: &Flower, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(CoreError::InvalidQuantity { quantity });
        }
        if !flower.in_stock() {
            return Err(CoreError::OutOfStock {
                id: flower.id.clone(),
                name: flower.name.clone(),
            });
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.kind == CartItemKind::ReadyMade && i.id == flower.id)
        {
            let requested = item.quantity + quantity;
            if requested > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = requested;
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }
        self.check_room()?;

        self.items.push(CartItem {
            id: flower.id.clone(),
            name: flower.name.clone(),
            unit_price_cents: flower.price_cents,
            quantity,
            kind: CartItemKind::ReadyMade,
            composition: None,
            added_at: Utc::now(),
        });
        Ok(())
    }

    /// Sets a line's quantity. Zero removes the line.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(id);
        }
        if quantity < 0 {
            return Err(CoreError::InvalidQuantity { quantity });
        }
        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CoreError::CartItemNotFound(id.to_string()))?;
        item.quantity = quantity;
        Ok(())
    }

    pub fn remove_item(&mut self, id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != id);

        if self.items.len() == initial_len {
            return Err(CoreError::CartItemNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of line quantities.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_room(&self) -> CoreResult<()> {
        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }
        Ok(())
    }
}

/// Cart totals for the drawer badge and summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
        }
    }
}
