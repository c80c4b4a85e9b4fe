//! # petal-store: Settings Persistence for the Petal & Prose Studio
//!
//! SQLite storage for what the storefront used to keep in browser local
//! storage: the wholesale pricing configuration and the user's saved
//! collection of presets.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Studio command (update_wholesale, save_user_preset, ...)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    petal-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │   │   Repositories    │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄──│ SettingsRepository│   │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │   │ PresetRepository  │   │ 001_settings │  │   │
//! │  │   └───────────────┘   │ SqliteConfigStore │   └──────────────┘  │   │
//! │  │                       └───────────────────┘                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (WAL mode)                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use petal_core::WholesaleManager;
//! use petal_store::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./petal.db")).await?;
//! let manager = WholesaleManager::load(db.config_store()).await?;
//! ```

pub mod config_store;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use config_store::SqliteConfigStore;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, DbLocation};
pub use repository::presets::PresetRepository;
pub use repository::settings::{
    Setting, SettingsRepository, USER_COLLECTIONS_KEY, WHOLESALE_CONFIG_KEY,
};
