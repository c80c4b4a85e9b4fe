//! # Wholesale Admin Commands
//!
//! Edits to volume tiers, customer segments and the simulated order
//! quantity. Every edit is validated and saved before it goes live; a
//! rejected edit leaves the live settings untouched.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  admin form ──► add_tier(100, 30) ──► WholesaleManager::update          │
//! │                                         │                               │
//! │                                         ├─ edit a copy                  │
//! │                                         ├─ validate_wholesale_config    │
//! │                                         ├─ SqliteConfigStore::save      │
//! │                                         └─ swap in ──► updated config   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use petal_core::{CoreError, CoreResult, ValidationError, WholesaleConfig};

use crate::error::ApiError;
use crate::state::WholesaleState;

async fn edit<F>(wholesale: &WholesaleState, change: F) -> Result<WholesaleConfig, ApiError>
where
    F: FnOnce(&mut WholesaleConfig) -> CoreResult<()> + Send,
{
    let mut manager = wholesale.lock().await;
    manager.update(change).await??;
    Ok(manager.config().clone())
}

fn found(found: bool, resource: &str, id: &str) -> CoreResult<()> {
    if found {
        Ok(())
    } else {
        Err(CoreError::Validation(ValidationError::UnknownReference {
            field: resource.to_string(),
            value: id.to_string(),
        }))
    }
}

pub async fn get_wholesale_config(wholesale: &WholesaleState) -> WholesaleConfig {
    wholesale.snapshot().await
}

pub async fn set_wholesale_enabled(
    wholesale: &WholesaleState,
    enabled: bool,
) -> Result<WholesaleConfig, ApiError> {
    info!(enabled, "set_wholesale_enabled command");
    edit(wholesale, |cfg| {
        cfg.enabled = enabled;
        Ok(())
    })
    .await
}

/// Sets the preview quantity. Values below 1 are clamped to 1.
pub async fn set_simulated_quantity(
    wholesale: &WholesaleState,
    quantity: i64,
) -> Result<WholesaleConfig, ApiError> {
    debug!(quantity, "set_simulated_quantity command");
    edit(wholesale, |cfg| {
        cfg.set_simulated_quantity(quantity);
        Ok(())
    })
    .await
}

pub async fn add_tier(
    wholesale: &WholesaleState,
    min_quantity: i64,
    discount_percentage: f64,
) -> Result<WholesaleConfig, ApiError> {
    info!(min_quantity, discount_percentage, "add_tier command");
    edit(wholesale, |cfg| {
        cfg.add_tier(min_quantity, discount_percentage);
        Ok(())
    })
    .await
}

pub async fn update_tier(
    wholesale: &WholesaleState,
    id: String,
    min_quantity: i64,
    discount_percentage: f64,
) -> Result<WholesaleConfig, ApiError> {
    info!(id = %id, min_quantity, discount_percentage, "update_tier command");
    edit(wholesale, move |cfg| {
        found(cfg.update_tier(&id, min_quantity, discount_percentage), "Tier", &id)
    })
    .await
}

pub async fn remove_tier(wholesale: &WholesaleState, id: String) -> Result<WholesaleConfig, ApiError> {
    info!(id = %id, "remove_tier command");
    edit(wholesale, move |cfg| found(cfg.remove_tier(&id), "Tier", &id)).await
}

pub async fn add_segment(
    wholesale: &WholesaleState,
    label: String,
    multiplier: f64,
) -> Result<WholesaleConfig, ApiError> {
    info!(label = %label, multiplier, "add_segment command");
    edit(wholesale, move |cfg| {
        cfg.add_segment(label, multiplier);
        Ok(())
    })
    .await
}

pub async fn update_segment(
    wholesale: &WholesaleState,
    id: String,
    label: String,
    multiplier: f64,
) -> Result<WholesaleConfig, ApiError> {
    info!(id = %id, label = %label, multiplier, "update_segment command");
    edit(wholesale, move |cfg| {
        found(cfg.update_segment(&id, label, multiplier), "Segment", &id)
    })
    .await
}

/// Removes a segment; removing the active one falls back to retail.
pub async fn remove_segment(
    wholesale: &WholesaleState,
    id: String,
) -> Result<WholesaleConfig, ApiError> {
    info!(id = %id, "remove_segment command");
    edit(wholesale, move |cfg| found(cfg.remove_segment(&id), "Segment", &id)).await
}

/// Selects the customer segment used for pricing. `None` or an empty id
/// means retail.
pub async fn select_segment(
    wholesale: &WholesaleState,
    id: Option<String>,
) -> Result<WholesaleConfig, ApiError> {
    debug!(?id, "select_segment command");
    edit(wholesale, move |cfg| {
        cfg.select_segment(id.as_deref());
        Ok(())
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use petal_core::WholesaleManager;
    use petal_store::{Database, DbConfig};

    async fn setup() -> (Database, WholesaleState) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let manager = WholesaleManager::load(db.config_store()).await.unwrap();
        (db.clone(), WholesaleState::new(manager))
    }

    #[tokio::test]
    async fn test_enable_and_select_segment_persist() {
        let (db, wholesale) = setup().await;

        set_wholesale_enabled(&wholesale, true).await.unwrap();
        let config = select_segment(&wholesale, Some("c2".into())).await.unwrap();
        assert_eq!(config.segment_label(), "Event Planner");

        let saved = WholesaleManager::load(db.config_store()).await.unwrap();
        assert!(saved.config().enabled);
        assert_eq!(saved.config().active_customer_type_id.as_deref(), Some("c2"));
    }

    #[tokio::test]
    async fn test_invalid_tier_rejected_and_live_config_kept() {
        let (_, wholesale) = setup().await;

        let err = add_tier(&wholesale, 20, 150.0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_wholesale_config(&wholesale).await.tiers.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_tier_update_rejected() {
        let (_, wholesale) = setup().await;
        let err = update_tier(&wholesale, "t9".into(), 5, 5.0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_removing_active_segment_falls_back_to_retail() {
        let (_, wholesale) = setup().await;

        select_segment(&wholesale, Some("c1".into())).await.unwrap();
        let config = remove_segment(&wholesale, "c1".into()).await.unwrap();

        assert_eq!(config.active_customer_type_id, None);
        assert_eq!(config.segment_label(), "Retail");
    }

    #[tokio::test]
    async fn test_simulated_quantity_clamped() {
        let (_, wholesale) = setup().await;
        let config = set_simulated_quantity(&wholesale, -4).await.unwrap();
        assert_eq!(config.simulated_quantity, 1);
    }

    #[tokio::test]
    async fn test_tier_edit_round_trip() {
        let (_, wholesale) = setup().await;

        let config = add_tier(&wholesale, 100, 30.0).await.unwrap();
        let new_id = config.tiers.last().unwrap().id.clone();

        let config = update_tier(&wholesale, new_id.clone(), 200, 35.0).await.unwrap();
        assert_eq!(config.applicable_tier(250).unwrap().discount_percentage, 35.0);

        let config = remove_tier(&wholesale, new_id).await.unwrap();
        assert_eq!(config.tiers.len(), 2);
    }
}
