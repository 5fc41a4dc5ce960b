//! SQLite-backed durable key-value store.
//!
//! Implements `KvStore` from `fitcoach-core` over the `local_storage` table.
//! Writes are last-write-wins upserts.

use chrono::Utc;
use fitcoach_core::storage::KvStore;
use fitcoach_types::error::StoreError;
use fitcoach_types::storage::StorageKey;
use sqlx::Row;

use super::pool::DatabasePool;

pub struct SqliteKvStore {
    pool: DatabasePool,
}

impl SqliteKvStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl KvStore for SqliteKvStore {
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT value FROM local_storage WHERE key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let value: String = row
                    .try_get("value")
                    .map_err(|e| StoreError::Query(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO local_storage (key, value, updated_at)
               VALUES (?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key.as_str())
        .bind(value)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: StorageKey) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key.as_str())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_core::session::SessionIdentity;

    async fn open(dir: &tempfile::TempDir) -> SqliteKvStore {
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("kv.db").display());
        SqliteKvStore::new(DatabasePool::new(&url).await.unwrap())
    }

    #[tokio::test]
    async fn test_set_get_overwrite_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = open(&dir).await;

        assert!(store.get(StorageKey::Token).await.unwrap().is_none());

        store.set(StorageKey::Token, "first").await.unwrap();
        store.set(StorageKey::Token, "second").await.unwrap();
        assert_eq!(
            store.get(StorageKey::Token).await.unwrap().as_deref(),
            Some("second")
        );

        store.delete(StorageKey::Token).await.unwrap();
        assert!(store.get(StorageKey::Token).await.unwrap().is_none());

        // Deleting a missing key is a no-op.
        store.delete(StorageKey::Token).await.unwrap();
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = open(&dir).await;
            store
                .set(StorageKey::UserRoles, r#"["USER"]"#)
                .await
                .unwrap();
        }

        let reopened = open(&dir).await;
        assert_eq!(
            reopened.get(StorageKey::UserRoles).await.unwrap().as_deref(),
            Some(r#"["USER"]"#)
        );
    }

    #[tokio::test]
    async fn test_session_id_persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let first = SessionIdentity::new(open(&dir).await).init(None).await;
        let second = SessionIdentity::new(open(&dir).await).init(None).await;
        assert_eq!(first, second);

        let signed_in = SessionIdentity::new(open(&dir).await).init(Some(4)).await;
        assert_ne!(signed_in, second);
    }
}
