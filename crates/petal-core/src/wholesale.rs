//! # Wholesale Configuration
//!
//! Bulk-buyer pricing settings edited from the studio's admin panel, and the
//! settings store they are persisted through.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WholesaleManager<S: ConfigStore>                                       │
//! │                                                                         │
//! │   load(store) ─► store.load() ─► Some(config) ──► use it                │
//! │                               └► None ──────────► WholesaleConfig::default()
//! │                                                                         │
//! │   update(|cfg| edit) ─► clone ─► edit ─► validate ─► store.save ─► swap │
//! │                                            │                            │
//! │                                            └─ invalid: nothing changes  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The JSON shape of [`WholesaleConfig`] matches the blob the browser kept in
//! local storage, so existing saved settings load unchanged.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation::validate_wholesale_config;

/// Label used when no customer segment is selected.
pub const RETAIL_LABEL: &str = "Retail";

// =============================================================================
// Configuration Types
// =============================================================================

/// Quantity threshold unlocking a percentage discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WholesaleTier {
    pub id: String,
    /// Minimum order quantity for the tier to apply.
    pub min_quantity: i64,
    /// Discount in percent, 0-100.
    pub discount_percentage: f64,
}

/// Per-segment multiplicative price adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerMultiplier {
    pub id: String,
    /// Segment name ("Boutique", "Hotel Chain", ...).
    #[serde(rename = "type")]
    #[ts(rename = "type")]
    pub label: String,
    /// Factor in (0, 1].
    pub multiplier: f64,
}

/// Wholesale pricing settings.
///
/// ## Preconditions for pricing
/// Multipliers lie in (0, 1] and tier discounts in [0, 100]. The admin edit
/// path enforces this through [`validate_wholesale_config`]; the pricing
/// engine itself does not re-check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WholesaleConfig {
    pub enabled: bool,
    pub tiers: Vec<WholesaleTier>,
    pub customer_multipliers: Vec<CustomerMultiplier>,
    pub active_customer_type_id: Option<String>,
    /// Order quantity used to preview bulk pricing.
    pub simulated_quantity: i64,
}

impl Default for WholesaleConfig {
    /// Studio defaults: disabled, two volume tiers, three trade segments.
    fn default() -> Self {
        WholesaleConfig {
            enabled: false,
            tiers: vec![
                WholesaleTier {
                    id: "t1".to_string(),
                    min_quantity: 10,
                    discount_percentage: 10.0,
                },
                WholesaleTier {
                    id: "t2".to_string(),
                    min_quantity: 50,
                    discount_percentage: 20.0,
                },
            ],
            customer_multipliers: vec![
                CustomerMultiplier {
                    id: "c1".to_string(),
                    label: "Boutique".to_string(),
                    multiplier: 0.85,
                },
                CustomerMultiplier {
                    id: "c2".to_string(),
                    label: "Event Planner".to_string(),
                    multiplier: 0.75,
                },
                CustomerMultiplier {
                    id: "c3".to_string(),
                    label: "Hotel Chain".to_string(),
                    multiplier: 0.70,
                },
            ],
            active_customer_type_id: None,
            simulated_quantity: 1,
        }
    }
}

impl WholesaleConfig {
    /// The selected customer segment, if it still exists.
    pub fn active_segment(&self) -> Option<&CustomerMultiplier> {
        let id = self.active_customer_type_id.as_deref()?;
        self.customer_multipliers.iter().find(|c| c.id == id)
    }

    /// Multiplier of the selected segment, 1.0 when none is selected.
    pub fn active_multiplier(&self) -> f64 {
        self.active_segment().map_or(1.0, |c| c.multiplier)
    }

    /// Display label of the selected segment, "Retail" when none.
    pub fn segment_label(&self) -> &str {
        self.active_segment()
            .map_or(RETAIL_LABEL, |c| c.label.as_str())
    }

    /// Tier with the greatest threshold not above `quantity`.
    ///
    /// Thresholds are expected to be unique; if two tiers share one, the one
    /// listed last wins.
    pub fn applicable_tier(&self, quantity: i64) -> Option<&WholesaleTier> {
        self.tiers
            .iter()
            .filter(|t| t.min_quantity <= quantity)
            .max_by_key(|t| t.min_quantity)
    }

    /// Prepares a configuration read back from a store: the simulated
    /// quantity is coerced to at least 1, then every admin rule is checked.
    ///
    /// A config that fails here must not go live, since pricing assumes
    /// multipliers in (0, 1] and discounts in [0, 100].
    pub fn checked_for_load(mut self) -> Result<Self, ValidationError> {
        self.set_simulated_quantity(self.simulated_quantity);
        validate_wholesale_config(&self)?;
        Ok(self)
    }

    /// Sets the simulated quantity from raw input, coercing to at least 1.
    pub fn set_simulated_quantity(&mut self, raw: i64) {
        self.simulated_quantity = raw.max(1);
    }

    /// Appends a volume tier and returns its id.
    pub fn add_tier(&mut self, min_quantity: i64, discount_percentage: f64) -> String {
        let id = Uuid::new_v4().to_string();
        self.tiers.push(WholesaleTier {
            id: id.clone(),
            min_quantity,
            discount_percentage,
        });
        id
    }

    /// Changes a tier's threshold and discount. Returns false if not found.
    pub fn update_tier(&mut self, id: &str, min_quantity: i64, discount_percentage: f64) -> bool {
        match self.tiers.iter_mut().find(|t| t.id == id) {
            Some(tier) => {
                tier.min_quantity = min_quantity;
                tier.discount_percentage = discount_percentage;
                true
            }
            None => false,
        }
    }

    /// Removes a tier. Returns false if not found.
    pub fn remove_tier(&mut self, id: &str) -> bool {
        let before = self.tiers.len();
        self.tiers.retain(|t| t.id != id);
        self.tiers.len() != before
    }

    /// Appends a customer segment and returns its id.
    pub fn add_segment(&mut self, label: impl Into<String>, multiplier: f64) -> String {
        let id = Uuid::new_v4().to_string();
        self.customer_multipliers.push(CustomerMultiplier {
            id: id.clone(),
            label: label.into(),
            multiplier,
        });
        id
    }

    /// Changes a segment's label and multiplier. Returns false if not found.
    pub fn update_segment(&mut self, id: &str, label: impl Into<String>, multiplier: f64) -> bool {
        match self.customer_multipliers.iter_mut().find(|c| c.id == id) {
            Some(segment) => {
                segment.label = label.into();
                segment.multiplier = multiplier;
                true
            }
            None => false,
        }
    }

    /// Removes a segment, clearing the selection if it was active.
    pub fn remove_segment(&mut self, id: &str) -> bool {
        let before = self.customer_multipliers.len();
        self.customer_multipliers.retain(|c| c.id != id);

        if self.active_customer_type_id.as_deref() == Some(id) {
            self.active_customer_type_id = None;
        }

        self.customer_multipliers.len() != before
    }

    /// Selects a segment by id; `None` or an empty id returns to retail.
    pub fn select_segment(&mut self, id: Option<&str>) {
        self.active_customer_type_id = id.filter(|s| !s.is_empty()).map(str::to_string);
    }
}

// =============================================================================
// Settings Store
// =============================================================================

/// Load/save contract of the external settings store.
///
/// Implemented by `petal-store` over SQLite and by [`MemoryConfigStore`].
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Loads the saved configuration, `None` if nothing was saved yet.
    async fn load(&self) -> CoreResult<Option<WholesaleConfig>>;

    /// Persists the configuration, replacing any previous value.
    async fn save(&self, config: &WholesaleConfig) -> CoreResult<()>;
}

/// In-process store, for tests and sessions without persistence.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    saved: Mutex<Option<WholesaleConfig>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a saved configuration.
    pub fn with_config(config: WholesaleConfig) -> Self {
        MemoryConfigStore {
            saved: Mutex::new(Some(config)),
        }
    }

    /// Returns a copy of what was last saved.
    pub fn snapshot(&self) -> Option<WholesaleConfig> {
        self.saved.lock().ok().and_then(|saved| saved.clone())
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn load(&self) -> CoreResult<Option<WholesaleConfig>> {
        let saved = self
            .saved
            .lock()
            .map_err(|_| CoreError::Storage("memory store poisoned".to_string()))?;
        Ok(saved.clone())
    }

    async fn save(&self, config: &WholesaleConfig) -> CoreResult<()> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| CoreError::Storage("memory store poisoned".to_string()))?;
        *saved = Some(config.clone());
        Ok(())
    }
}

// =============================================================================
// Manager
// =============================================================================

/// Owns the live wholesale configuration and its store.
///
/// Every administrative edit goes through [`WholesaleManager::update`], which
/// validates the edited copy and saves it before it becomes visible.
#[derive(Debug)]
pub struct WholesaleManager<S: ConfigStore> {
    config: WholesaleConfig,
    store: S,
}

impl<S: ConfigStore> WholesaleManager<S> {
    /// Loads the saved configuration, falling back to defaults when nothing
    /// is saved or the saved copy breaks an admin rule.
    pub async fn load(store: S) -> CoreResult<Self> {
        let config = Self::read(&store).await?;
        Ok(WholesaleManager { config, store })
    }

    async fn read(store: &S) -> CoreResult<WholesaleConfig> {
        Ok(store
            .load()
            .await?
            .and_then(|saved| saved.checked_for_load().ok())
            .unwrap_or_default())
    }

    /// The live configuration.
    pub fn config(&self) -> &WholesaleConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies an edit, validates it, saves it, then makes it live.
    ///
    /// ## Errors
    /// - `Validation` if the edited configuration breaks a rule
    /// - `Storage` if the save fails
    ///
    /// On error the live configuration is unchanged.
    pub async fn update<F, R>(&mut self, edit: F) -> CoreResult<R>
    where
        F: FnOnce(&mut WholesaleConfig) -> R + Send,
        R: Send,
    {
        let mut next = self.config.clone();
        let result = edit(&mut next);

        validate_wholesale_config(&next)?;
        self.store.save(&next).await?;
        self.config = next;

        Ok(result)
    }

    /// Discards edits and reloads what the store holds.
    pub async fn reload(&mut self) -> CoreResult<()> {
        self.config = Self::read(&self.store).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
