//! # Cart Commands
//!
//! Cart drawer: add the current design or loose stems, change quantities,
//! remove lines.
//!
//! ## Adding a Design
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_design_to_cart                                                     │
//! │       │                                                                 │
//! │       ├─ snapshot the composition (the canvas is left as is)           │
//! │       ├─ PricingSummary::summarize(composition, catalog, wholesale)     │
//! │       │     retail:    unit price                                       │
//! │       │     wholesale: unit price × simulated quantity, as one line     │
//! │       └─ Cart::add_custom("Bespoke Arrangement")                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use petal_core::cart::CartTotals;
use petal_core::{Cart, CartItem, Catalog, PricingSummary};

use crate::error::ApiError;
use crate::state::{BuilderState, CartState, WholesaleState};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items.clone(),
            totals: CartTotals::from(cart),
        }
    }
}

fn respond<F>(cart: &CartState, edit: F) -> Result<CartResponse, ApiError>
where
    F: FnOnce(&mut Cart) -> Result<(), ApiError>,
{
    cart.with_cart_mut(|c| {
        edit(c)?;
        Ok::<_, ApiError>(CartResponse::from(&*c))
    })?
}

pub fn get_cart(cart: &CartState) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

pub fn get_cart_totals(cart: &CartState) -> Result<CartTotals, ApiError> {
    cart.with_cart(|c| CartTotals::from(c))
}

/// Adds the current design at its checkout price.
///
/// ## Errors
/// - `BUSINESS_LOGIC` if the canvas is empty
/// - `CART_ERROR` if the cart is full
pub async fn add_design_to_cart(
    catalog: &Catalog,
    builder: &BuilderState,
    wholesale: &WholesaleState,
    cart: &CartState,
) -> Result<CartResponse, ApiError> {
    let config = wholesale.snapshot().await;
    let composition = builder.with_builder(|b| b.composition().clone())?;

    let summary = PricingSummary::summarize(&composition, catalog, &config)?;
    let amount = summary.checkout_amount();

    respond(cart, |c| {
        let id = c.add_custom(composition, amount)?;
        info!(
            id = %id,
            amount = amount.cents(),
            wholesale = summary.wholesale_enabled,
            quantity = summary.quantity,
            "Design added to cart"
        );
        Ok(())
    })
}

/// Adds loose stems of a catalog flower.
pub fn add_flower_to_cart(
    catalog: &Catalog,
    cart: &CartState,
    flower_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(flower_id, quantity, "add_flower_to_cart command");

    let flower = catalog.require(flower_id)?;
    respond(cart, |c| Ok(c.add_ready_made(flower, quantity)?))
}

/// Sets a line's quantity; 0 removes the line.
pub fn update_cart_item(
    cart: &CartState,
    item_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(item_id, quantity, "update_cart_item command");
    respond(cart, |c| Ok(c.update_quantity(item_id, quantity)?))
}

pub fn remove_from_cart(cart: &CartState, item_id: &str) -> Result<CartResponse, ApiError> {
    debug!(item_id, "remove_from_cart command");
    respond(cart, |c| Ok(c.remove_item(item_id)?))
}

pub fn clear_cart(cart: &CartState) -> Result<CartResponse, ApiError> {
    info!("clear_cart command");
    respond(cart, |c| {
        c.clear();
        Ok(())
    })
}
