//! # Checkout Commands
//!
//! Order summary for the selected delivery option, and order placement.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  delivery step ──► get_order_summary(option) ──► subtotal + fee        │
//! │                                                                         │
//! │  submit ──► place_order(form)                                          │
//! │               ├─ cart empty?        ──► CART_ERROR                     │
//! │               ├─ form.validate()    ──► VALIDATION_ERROR + fields      │
//! │               └─ confirmation       ──► cart cleared                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use petal_core::checkout::{self, DeliveryOption, OrderConfirmation, OrderForm, OrderSummary};

use crate::error::ApiError;
use crate::state::{CartState, StudioConfig};

/// Order summary with display strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryResponse {
    pub summary: OrderSummary,
    pub delivery_name: &'static str,
    pub subtotal_display: String,
    pub delivery_fee_display: String,
    pub total_display: String,
}

/// Delivery option as listed on the delivery step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryChoice {
    pub option: DeliveryOption,
    pub name: &'static str,
    pub description: &'static str,
    pub fee_display: String,
}

pub fn list_delivery_options(config: &StudioConfig) -> Vec<DeliveryChoice> {
    DeliveryOption::ALL
        .iter()
        .map(|o| DeliveryChoice {
            option: *o,
            name: o.name(),
            description: o.description(),
            fee_display: config.format_money(o.fee()),
        })
        .collect()
}

pub fn get_order_summary(
    config: &StudioConfig,
    cart: &CartState,
    delivery: DeliveryOption,
) -> Result<OrderSummaryResponse, ApiError> {
    debug!(?delivery, "get_order_summary command");
    let summary = cart.with_cart(|c| OrderSummary::new(c, delivery))?;

    Ok(OrderSummaryResponse {
        delivery_name: delivery.name(),
        subtotal_display: config.format_money(summary.subtotal),
        delivery_fee_display: config.format_money(summary.delivery_fee),
        total_display: config.format_money(summary.total),
        summary,
    })
}

/// Validates the form and places the order. The cart is emptied only on
/// success.
pub fn place_order(cart: &CartState, form: OrderForm) -> Result<OrderConfirmation, ApiError> {
    let result = cart.with_cart_mut(|c| {
        let confirmation = checkout::place_order(c, &form, Utc::now())?;
        c.clear();
        Ok::<_, ApiError>(confirmation)
    })?;

    match &result {
        Ok(confirmation) => info!(
            order_id = %confirmation.order_id,
            total = confirmation.summary.total.cents(),
            delivery = ?confirmation.delivery_option,
            "Order placed"
        ),
        Err(e) => warn!(code = ?e.code, "Order rejected: {}", e.message),
    }
    result
}
