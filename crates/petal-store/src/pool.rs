//! # Settings Database
//!
//! Opens the SQLite pool the settings live in and hands out repositories.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(path) / DbConfig::in_memory()                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Database::new ──► SqlitePool ──► embedded migrations                  │
//! │        │                                                                │
//! │        ├── settings()      ──► SettingsRepository                      │
//! │        ├── presets()       ──► PresetRepository                        │
//! │        └── config_store()  ──► SqliteConfigStore                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! File databases use WAL journaling so a reader never waits on the
//! single writer. An in-memory database lives only as long as its one
//! connection, so the pool is pinned to exactly one.

use std::path::PathBuf;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config_store::SqliteConfigStore;
use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::presets::PresetRepository;
use crate::repository::settings::SettingsRepository;

/// Where the settings database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// A file, created on first open.
    File(PathBuf),
    /// A private database that disappears with the pool.
    Memory,
}

/// How to open the settings database.
///
/// ```rust,ignore
/// let config = DbConfig::new("./petal.db").max_connections(2);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: DbLocation,

    /// Default: 4. The studio is a single session, so few are needed.
    pub max_connections: u32,

    pub min_connections: u32,

    /// How long to wait for a free connection. Default: 10 seconds
    pub acquire_timeout: Duration,

    /// How long SQLite retries a locked database before failing.
    pub busy_timeout: Duration,

    /// Apply embedded migrations on open. Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: DbLocation::File(path.into()),
            max_connections: 4,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(10),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Private in-memory database, used by tests.
    pub fn in_memory() -> Self {
        DbConfig {
            location: DbLocation::Memory,
            max_connections: 1,
            min_connections: 1,
            ..DbConfig::new(PathBuf::new())
        }
    }

    /// Ignored for in-memory databases, which always use one connection.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        let options = match &self.location {
            DbLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
            DbLocation::Memory => SqliteConnectOptions::new().in_memory(true),
        };

        options.foreign_keys(true).busy_timeout(self.busy_timeout)
    }

    fn pool_bounds(&self) -> (u32, u32) {
        match self.location {
            DbLocation::Memory => (1, 1),
            DbLocation::File(_) => (
                self.min_connections.min(self.max_connections),
                self.max_connections,
            ),
        }
    }
}

/// Handle to the settings database. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(location = ?config.location, "Opening settings database");

        let (min, max) = config.pool_bounds();
        let mut pool_options = SqlitePoolOptions::new()
            .min_connections(min)
            .max_connections(max)
            .acquire_timeout(config.acquire_timeout);

        if config.location == DbLocation::Memory {
            // the database is dropped with its last connection
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(config.connect_options())
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        debug!(min, max, "Pool ready");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        info!("Settings schema up to date");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.pool.clone())
    }

    pub fn presets(&self) -> PresetRepository {
        PresetRepository::new(self.settings())
    }

    /// Wholesale configuration store for `WholesaleManager`.
    pub fn config_store(&self) -> SqliteConfigStore {
        SqliteConfigStore::new(self.settings())
    }

    /// Closes every connection. Later queries fail.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Settings database closed");
    }

    /// True when a trivial query round-trips.
    pub async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}
