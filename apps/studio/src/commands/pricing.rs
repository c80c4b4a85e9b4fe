//! # Pricing Commands
//!
//! The builder's price panel: retail unit price, wholesale unit price for
//! the active segment and tier, and the simulated order total.

use serde::Serialize;
use tracing::debug;

use petal_core::{Catalog, PricingSummary};

use crate::error::ApiError;
use crate::state::{BuilderState, StudioConfig, WholesaleState};

/// Price panel with amounts already formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPanel {
    pub summary: PricingSummary,
    pub unit_price_display: String,
    pub wholesale_unit_price_display: String,
    pub total_order_price_display: String,
}

/// Prices the current design against the live wholesale settings.
pub async fn get_pricing_summary(
    catalog: &Catalog,
    builder: &BuilderState,
    wholesale: &WholesaleState,
) -> Result<PricingSummary, ApiError> {
    let config = wholesale.snapshot().await;
    let composition = builder.with_builder(|b| b.composition().clone())?;

    let summary = PricingSummary::summarize(&composition, catalog, &config)?;
    debug!(
        unit = summary.unit_price.cents(),
        wholesale_unit = summary.wholesale_unit_price.cents(),
        quantity = summary.quantity,
        "get_pricing_summary command"
    );
    Ok(summary)
}

pub async fn get_pricing_panel(
    config: &StudioConfig,
    catalog: &Catalog,
    builder: &BuilderState,
    wholesale: &WholesaleState,
) -> Result<PricingPanel, ApiError> {
    let summary = get_pricing_summary(catalog, builder, wholesale).await?;

    Ok(PricingPanel {
        unit_price_display: config.format_money(summary.unit_price),
        wholesale_unit_price_display: config.format_money(summary.wholesale_unit_price),
        total_order_price_display: config.format_money(summary.total_order_price),
        summary,
    })
}
