//! # Saved Collection Commands
//!
//! The user's own presets: snapshot the canvas under a name, list, load
//! back onto the canvas, delete.

use chrono::Utc;
use tracing::info;

use petal_core::UserPreset;
use petal_store::Database;

use super::builder::BuilderResponse;
use crate::error::ApiError;
use crate::state::BuilderState;

/// Saves the current canvas under `name`.
///
/// ## Errors
/// - `VALIDATION_ERROR` if the name is blank or too long
/// - `BUSINESS_LOGIC` if the canvas is empty
pub async fn save_user_preset(
    db: &Database,
    builder: &BuilderState,
    name: String,
) -> Result<UserPreset, ApiError> {
    let preset = builder.with_builder(|b| b.save_preset(&name, Utc::now()))??;

    db.presets().save(&preset).await?;
    info!(id = %preset.id, name = %preset.name, "Preset saved");
    Ok(preset)
}

pub async fn list_user_presets(db: &Database) -> Result<Vec<UserPreset>, ApiError> {
    Ok(db.presets().list().await?)
}

/// Replaces the canvas with a saved preset, as one undoable step.
pub async fn load_user_preset(
    db: &Database,
    builder: &BuilderState,
    id: String,
) -> Result<BuilderResponse, ApiError> {
    let preset = db
        .presets()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Preset", &id))?;

    info!(id = %preset.id, name = %preset.name, "Loading saved preset");
    builder.with_builder_mut(|b| {
        b.load_composition(preset.composition);
        BuilderResponse::from(&*b)
    })
}

pub async fn delete_user_preset(db: &Database, id: String) -> Result<(), ApiError> {
    if !db.presets().delete(&id).await? {
        return Err(ApiError::not_found("Preset", &id));
    }
    info!(id = %id, "Preset deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use petal_core::Catalog;
    use petal_store::DbConfig;

    #[tokio::test]
    async fn test_save_list_load_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = Catalog::standard().unwrap();
        let builder = BuilderState::default();

        builder
            .with_builder_mut(|b| b.add_flower(catalog.get("f2").unwrap()))
            .unwrap()
            .unwrap();
        let saved = save_user_preset(&db, &builder, "  Blush Posy ".into()).await.unwrap();
        assert_eq!(saved.name, "Blush Posy");

        builder.with_builder_mut(|b| b.reset()).unwrap();

        let listed = list_user_presets(&db).await.unwrap();
        assert_eq!(listed.len(), 1);

        let loaded = load_user_preset(&db, &builder, saved.id.clone()).await.unwrap();
        assert_eq!(loaded.composition, saved.composition);
        assert!(loaded.can_undo);

        delete_user_preset(&db, saved.id.clone()).await.unwrap();
        assert!(list_user_presets(&db).await.unwrap().is_empty());

        let err = delete_user_preset(&db, saved.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_empty_canvas_cannot_be_saved() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let builder = BuilderState::default();

        let err = save_user_preset(&db, &builder, "Nothing".into()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert!(list_user_presets(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let builder = BuilderState::default();
        builder.with_builder_mut(|b| b.load_preset("Romantic")).unwrap().unwrap();

        let err = save_user_preset(&db, &builder, "   ".into()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
