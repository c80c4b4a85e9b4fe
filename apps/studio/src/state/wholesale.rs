//! # Wholesale State
//!
//! The wholesale manager behind a `tokio::sync::Mutex`: an edit holds the
//! lock across the settings-store save, so two admin edits cannot
//! interleave their writes.

use petal_core::{WholesaleConfig, WholesaleManager};
use petal_store::SqliteConfigStore;
use tokio::sync::{Mutex, MutexGuard};

pub struct WholesaleState {
    manager: Mutex<WholesaleManager<SqliteConfigStore>>,
}

impl WholesaleState {
    pub fn new(manager: WholesaleManager<SqliteConfigStore>) -> Self {
        WholesaleState {
            manager: Mutex::new(manager),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, WholesaleManager<SqliteConfigStore>> {
        self.manager.lock().await
    }

    /// Copy of the live configuration.
    pub async fn snapshot(&self) -> WholesaleConfig {
        self.manager.lock().await.config().clone()
    }
}

impl std::fmt::Debug for WholesaleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WholesaleState").finish_non_exhaustive()
    }
}
