//! Settings survive closing and reopening a database file.

use std::path::PathBuf;

use chrono::Utc;
use petal_core::{Composition, Placement, UserPreset, WholesaleManager};
use petal_store::{Database, DbConfig, WHOLESALE_CONFIG_KEY};

fn scratch_db(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "petal-store-{}-{}-{}.db",
        name,
        std::process::id(),
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

#[tokio::test]
async fn test_wholesale_and_presets_survive_reopen() {
    let path = scratch_db("reopen");

    {
        let db = Database::new(DbConfig::new(&path)).await.unwrap();

        let mut manager = WholesaleManager::load(db.config_store()).await.unwrap();
        manager
            .update(|cfg| {
                cfg.enabled = true;
                cfg.add_tier(100, 30.0);
            })
            .await
            .unwrap();

        let mut composition = Composition::new();
        composition.placements.push(Placement::new("f9"));
        db.presets()
            .save(&UserPreset::new("Garden Rose", composition, Utc::now()))
            .await
            .unwrap();

        db.close().await;
    }

    let db = Database::new(DbConfig::new(&path)).await.unwrap();

    let manager = WholesaleManager::load(db.config_store()).await.unwrap();
    assert!(manager.config().enabled);
    assert_eq!(manager.config().tiers.len(), 3);
    assert_eq!(manager.config().applicable_tier(120).unwrap().discount_percentage, 30.0);

    let presets = db.presets().list().await.unwrap();
    assert_eq!(presets.len(), 1);
    assert_eq!(presets[0].composition.placements[0].flower_id, "f9");

    assert!(db.settings().keys().await.unwrap().contains(&WHOLESALE_CONFIG_KEY.to_string()));

    db.close().await;
    let _ = std::fs::remove_file(&path);
}
