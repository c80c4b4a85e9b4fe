//! # SQLite Config Store
//!
//! [`ConfigStore`] over the settings table, keyed
//! `petal_prose_wholesale_config`.
//!
//! A blob that no longer decodes, or decodes to settings an admin edit could
//! never produce, is logged and treated as absent. The studio then starts on
//! defaults instead of refusing to open.

use async_trait::async_trait;
use petal_core::{ConfigStore, CoreResult, WholesaleConfig};
use tracing::{debug, warn};

use crate::repository::settings::{SettingsRepository, WHOLESALE_CONFIG_KEY};

/// Wholesale configuration persisted in SQLite.
#[derive(Debug, Clone)]
pub struct SqliteConfigStore {
    settings: SettingsRepository,
}

impl SqliteConfigStore {
    pub fn new(settings: SettingsRepository) -> Self {
        SqliteConfigStore { settings }
    }
}

#[async_trait]
impl ConfigStore for SqliteConfigStore {
    async fn load(&self) -> CoreResult<Option<WholesaleConfig>> {
        let Some(raw) = self.settings.get(WHOLESALE_CONFIG_KEY).await? else {
            debug!("No saved wholesale configuration");
            return Ok(None);
        };

        let config = match serde_json::from_str::<WholesaleConfig>(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Saved wholesale configuration is malformed, using defaults");
                return Ok(None);
            }
        };

        match config.checked_for_load() {
            Ok(config) => {
                debug!(enabled = config.enabled, tiers = config.tiers.len(), "Loaded wholesale configuration");
                Ok(Some(config))
            }
            Err(e) => {
                warn!(error = %e, "Saved wholesale configuration breaks a rule, using defaults");
                Ok(None)
            }
        }
    }

    async fn save(&self, config: &WholesaleConfig) -> CoreResult<()> {
        self.settings.put_json(WHOLESALE_CONFIG_KEY, config).await?;
        Ok(())
    }
}
