//! # Studio Configuration
//!
//! Settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PETAL_*`)
//! 2. Defaults (this file)
//!
//! Read-only after startup, so no lock.

use std::path::PathBuf;

use directories::ProjectDirs;
use petal_core::{Money, HISTORY_CAPACITY};
use serde::{Deserialize, Serialize};

use crate::error::StartupError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioConfig {
    /// Shown in the header and on confirmations
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    pub currency_symbol: String,

    pub currency_decimals: u8,

    /// Undo depth of the builder session
    pub history_capacity: usize,

    /// Settings database. `None` means the platform data directory.
    pub db_path: Option<PathBuf>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            store_name: "Petal & Prose".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            history_capacity: HISTORY_CAPACITY,
            db_path: None,
        }
    }
}

impl StudioConfig {
    /// Defaults overridden by the environment.
    ///
    /// ## Environment Variables
    /// - `PETAL_DB_PATH`: settings database file
    /// - `PETAL_STORE_NAME`: store name
    /// - `PETAL_CURRENCY_SYMBOL`: display symbol
    /// - `PETAL_HISTORY_CAPACITY`: undo depth (ignored unless a positive integer)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = StudioConfig::default();

        if let Some(path) = lookup("PETAL_DB_PATH") {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("PETAL_STORE_NAME") {
            config.store_name = name;
        }

        if let Some(symbol) = lookup("PETAL_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("PETAL_HISTORY_CAPACITY") {
            match raw.parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.history_capacity = capacity,
                _ => tracing::warn!(value = %raw, "Ignoring invalid PETAL_HISTORY_CAPACITY"),
            }
        }

        config
    }

    /// Resolves the database file, creating the data directory if needed.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.petal-prose.studio/petal.db`
    /// - **Windows**: `%APPDATA%\petal-prose\studio\data\petal.db`
    /// - **Linux**: `~/.local/share/studio/petal.db`
    pub fn database_path(&self) -> Result<PathBuf, StartupError> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }

        let dirs = ProjectDirs::from("com", "petal-prose", "studio").ok_or(StartupError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("petal.db"))
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = StudioConfig::default();
    /// assert_eq!(config.format_currency(1234), "$12.34");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = (cents / divisor).abs();
        let frac = (cents % divisor).abs();
        let sign = if cents < 0 { "-" } else { "" };

        if self.currency_decimals == 0 {
            return format!("{}{}{}", sign, self.currency_symbol, whole);
        }

        format!(
            "{}{}{}.{:0width$}",
            sign,
            self.currency_symbol,
            whole,
            frac,
            width = self.currency_decimals as usize
        )
    }

    pub fn format_money(&self, amount: Money) -> String {
        self.format_currency(amount.cents())
    }
}
