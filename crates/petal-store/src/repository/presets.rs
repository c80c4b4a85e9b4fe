//! # Preset Repository
//!
//! The user's saved collection, stored as one JSON array under
//! `petal_prose_user_collections`, newest last.

use petal_core::UserPreset;
use tracing::{debug, warn};

use crate::error::DbResult;
use crate::repository::settings::{SettingsRepository, USER_COLLECTIONS_KEY};

/// Repository for saved user presets.
#[derive(Debug, Clone)]
pub struct PresetRepository {
    settings: SettingsRepository,
}

impl PresetRepository {
    pub fn new(settings: SettingsRepository) -> Self {
        PresetRepository { settings }
    }

    /// All saved presets in save order.
    ///
    /// A corrupt collection loads as empty rather than failing the studio.
    pub async fn list(&self) -> DbResult<Vec<UserPreset>> {
        let Some(raw) = self.settings.get(USER_COLLECTIONS_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<UserPreset>>(&raw) {
            Ok(presets) => Ok(presets),
            Err(e) => {
                warn!(error = %e, "Saved collection is malformed, starting empty");
                Ok(Vec::new())
            }
        }
    }

    pub async fn get(&self, id: &str) -> DbResult<Option<UserPreset>> {
        Ok(self.list().await?.into_iter().find(|p| p.id == id))
    }

    /// Appends a preset, or replaces the one with the same id.
    pub async fn save(&self, preset: &UserPreset) -> DbResult<()> {
        let mut presets = self.list().await?;

        match presets.iter_mut().find(|p| p.id == preset.id) {
            Some(existing) => *existing = preset.clone(),
            None => presets.push(preset.clone()),
        }

        self.settings.put_json(USER_COLLECTIONS_KEY, &presets).await?;
        debug!(id = %preset.id, name = %preset.name, total = presets.len(), "Saved preset");
        Ok(())
    }

    /// Deletes a preset. Returns false if no preset had that id.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let mut presets = self.list().await?;
        let before = presets.len();
        presets.retain(|p| p.id != id);

        if presets.len() == before {
            return Ok(false);
        }

        self.settings.put_json(USER_COLLECTIONS_KEY, &presets).await?;
        debug!(id = %id, "Deleted preset");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use petal_core::presets::designer_preset;

    async fn repo() -> PresetRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().presets()
    }

    fn preset(name: &str) -> UserPreset {
        let composition = designer_preset("Romantic").unwrap().composition;
        UserPreset::new(name, composition, Utc::now())
    }

    #[tokio::test]
    async fn test_save_list_delete() {
        let presets = repo().await;
        assert!(presets.list().await.unwrap().is_empty());

        let first = preset("June Wedding");
        let second = preset("Gala");
        presets.save(&first).await.unwrap();
        presets.save(&second).await.unwrap();

        let names: Vec<String> = presets.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["June Wedding", "Gala"]);

        assert!(presets.delete(&first.id).await.unwrap());
        assert!(!presets.delete(&first.id).await.unwrap());
        assert_eq!(presets.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_same_id_replaces() {
        let presets = repo().await;
        let mut original = preset("Draft");
        presets.save(&original).await.unwrap();

        original.name = "Final".to_string();
        presets.save(&original).await.unwrap();

        let all = presets.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(presets.get(&original.id).await.unwrap().unwrap().name, "Final");
    }

    #[tokio::test]
    async fn test_malformed_collection_loads_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.settings().put(USER_COLLECTIONS_KEY, "[{\"oops\": 1}]").await.unwrap();
        assert!(db.presets().list().await.unwrap().is_empty());
    }
}
