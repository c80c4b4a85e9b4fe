//! # Seed Data Generator
//!
//! Writes default studio settings for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./petal_dev.db
//! cargo run -p petal-store --bin seed
//!
//! # Specify database path, overwrite existing settings
//! cargo run -p petal-store --bin seed -- --db ./data/petal.db --force
//! ```
//!
//! ## Seeded Settings
//! - Wholesale configuration: studio defaults, enabled, Boutique selected
//! - Saved collection: one copy of each designer preset

use chrono::Utc;
use petal_core::presets::designer_presets;
use petal_core::{ConfigStore, UserPreset, WholesaleConfig};
use petal_store::{Database, DbConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./petal_dev.db");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Petal & Prose Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./petal_dev.db)");
                println!("  -f, --force        Overwrite existing settings");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Petal & Prose Seed Data Generator");
    println!("====================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.settings().keys().await?;
    if !existing.is_empty() && !force {
        println!("⚠ Database already has {} settings", existing.len());
        println!("  Skipping seed to avoid overwriting them.");
        println!("  Pass --force to overwrite.");
        return Ok(());
    }

    let mut wholesale = WholesaleConfig::default();
    wholesale.enabled = true;
    wholesale.select_segment(Some("c1"));
    wholesale.set_simulated_quantity(25);
    db.config_store().save(&wholesale).await?;
    println!("✓ Wholesale configuration ({} tiers, {} segments)", wholesale.tiers.len(), wholesale.customer_multipliers.len());

    let presets = db.presets();
    for designer in designer_presets() {
        let preset = UserPreset::new(&designer.name, designer.composition, Utc::now());
        presets.save(&preset).await?;
        println!("✓ Preset: {}", preset.name);
    }

    db.close().await;

    println!();
    println!("Done.");
    Ok(())
}
