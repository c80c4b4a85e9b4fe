//! # Settings Repository
//!
//! String-keyed JSON blobs, the server-side counterpart of the browser's
//! local storage.
//!
//! ## Table
//! ```text
//! settings
//! ┌───────────────────────────────┬──────────────────────┬──────────────────┐
//! │ key (PK)                      │ value (JSON text)    │ updated_at       │
//! ├───────────────────────────────┼──────────────────────┼──────────────────┤
//! │ petal_prose_wholesale_config  │ {"enabled":true,...} │ 2024-05-10T09:…  │
//! │ petal_prose_user_collections  │ [{"id":"…",...}]     │ 2024-05-10T09:…  │
//! └───────────────────────────────┴──────────────────────┴──────────────────┘
//! ```

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Key of the wholesale pricing configuration.
pub const WHOLESALE_CONFIG_KEY: &str = "petal_prose_wholesale_config";

/// Key of the saved user presets.
pub const USER_COLLECTIONS_KEY: &str = "petal_prose_user_collections";

/// A stored setting.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

/// Repository for key-value settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Raw value of a key, `None` if never written.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        debug!(key = %key, found = value.is_some(), "Read setting");
        Ok(value)
    }

    /// Full record of a key, with its last write time.
    pub async fn get_record(&self, key: &str) -> DbResult<Option<Setting>> {
        let record = sqlx::query_as::<_, Setting>(
            "SELECT key, value, updated_at FROM settings WHERE key = ?1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Writes a value, replacing any previous one.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Wrote setting");
        Ok(())
    }

    /// Deletes a key. Returns false if it did not exist.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM settings WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All keys, sorted.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM settings ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }

    /// Decodes a JSON value. Malformed JSON is an error here; callers that
    /// want tolerant loads decide for themselves.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> DbResult<Option<T>> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encodes and writes a JSON value.
    pub async fn put_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DbResult<()> {
        let raw = serde_json::to_string(value)?;
        self.put(key, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> SettingsRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().settings()
    }

    #[tokio::test]
    async fn test_put_get_roundtrip_and_upsert() {
        let settings = repo().await;
        assert_eq!(settings.get("theme").await.unwrap(), None);

        settings.put("theme", "\"blush\"").await.unwrap();
        settings.put("theme", "\"sage\"").await.unwrap();

        assert_eq!(settings.get("theme").await.unwrap().as_deref(), Some("\"sage\""));
        assert_eq!(settings.keys().await.unwrap(), vec!["theme".to_string()]);

        let record = settings.get_record("theme").await.unwrap().unwrap();
        assert!(!record.updated_at.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let settings = repo().await;
        settings.put("a", "1").await.unwrap();

        assert!(settings.delete("a").await.unwrap());
        assert!(!settings.delete("a").await.unwrap());
        assert!(settings.keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let settings = repo().await;
        settings.put_json("nums", &vec![1, 2, 3]).await.unwrap();
        let nums: Option<Vec<i32>> = settings.get_json("nums").await.unwrap();
        assert_eq!(nums, Some(vec![1, 2, 3]));

        settings.put("broken", "{not json").await.unwrap();
        let broken: DbResult<Option<Vec<i32>>> = settings.get_json("broken").await;
        assert!(matches!(broken, Err(DbError::Serialization(_))));
    }
}
