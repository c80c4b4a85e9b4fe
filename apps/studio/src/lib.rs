//! # Petal & Prose Studio
//!
//! The command layer the storefront UI binds to: it owns the design
//! session, the cart and the wholesale settings, and delegates every rule
//! to `petal-core` and every write to `petal-store`.
//!
//! ## Module Organization
//! ```text
//! petal_studio/
//! ├── lib.rs          ◄─── You are here (startup & tracing)
//! ├── state/          ◄─── Builder, cart, wholesale, config, advisor
//! ├── commands/       ◄─── Functions the UI invokes
//! └── error.rs        ◄─── ApiError returned by commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StudioConfig::from_env()                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(path)  ──► migrations applied                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::standard()  ──► 25 stems validated                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WholesaleManager::load(SqliteConfigStore) ──► saved or default        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StudioApp { builder, cart, wholesale, advisor }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use petal_core::advisor::FloralAdvisor;
use petal_core::{BouquetBuilder, Catalog, WholesaleManager};
use petal_store::{Database, DbConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use error::{ApiError, ErrorCode, StartupError};
use state::{AdvisorState, BuilderState, CartState, StudioConfig, WholesaleState};

/// Everything a running studio holds.
#[derive(Debug)]
pub struct StudioApp {
    pub config: StudioConfig,
    pub db: Database,
    pub catalog: Catalog,
    pub builder: BuilderState,
    pub cart: CartState,
    pub wholesale: WholesaleState,
    pub advisor: AdvisorState,
}

impl StudioApp {
    /// Opens the settings database named by `config` and loads the studio.
    pub async fn open(config: StudioConfig) -> Result<Self, StartupError> {
        let db_path = config.database_path()?;
        info!(?db_path, "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        Self::with_database(config, db).await
    }

    /// Loads the studio on an already opened database.
    pub async fn with_database(config: StudioConfig, db: Database) -> Result<Self, StartupError> {
        let catalog = Catalog::standard()?;
        info!(flowers = catalog.len(), "Catalog loaded");

        let manager = WholesaleManager::load(db.config_store()).await?;
        info!(
            enabled = manager.config().enabled,
            tiers = manager.config().tiers.len(),
            segments = manager.config().customer_multipliers.len(),
            "Wholesale settings loaded"
        );

        let builder = BouquetBuilder::with_history_capacity(config.history_capacity);

        Ok(StudioApp {
            builder: BuilderState::new(builder),
            cart: CartState::new(),
            wholesale: WholesaleState::new(manager),
            advisor: AdvisorState::disabled(),
            catalog,
            config,
            db,
        })
    }

    /// Studio on a private in-memory database.
    pub async fn in_memory() -> Result<Self, StartupError> {
        let db = Database::new(DbConfig::in_memory()).await?;
        Self::with_database(StudioConfig::default(), db).await
    }

    /// Attaches the AI collaborator.
    pub fn with_advisor(mut self, advisor: Arc<dyn FloralAdvisor>) -> Self {
        self.advisor = AdvisorState::new(advisor);
        self
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=petal=trace` - Show trace for petal crates only
/// - Default: `info,petal=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,petal=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_studio_starts_on_defaults() {
        let app = StudioApp::in_memory().await.unwrap();

        assert_eq!(app.catalog.len(), 25);
        assert!(!app.wholesale.snapshot().await.enabled);
        assert!(app.cart.with_cart(|c| c.is_empty()).unwrap());
        assert!(!app.advisor.is_available());
    }

    #[tokio::test]
    async fn test_history_capacity_comes_from_config() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let config = StudioConfig {
            history_capacity: 7,
            ..StudioConfig::default()
        };
        let app = StudioApp::with_database(config, db).await.unwrap();

        let capacity = app.builder.with_builder(|b| b.history().capacity()).unwrap();
        assert_eq!(capacity, 7);
    }
}
