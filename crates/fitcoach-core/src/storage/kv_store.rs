//! Key-value store trait.

use std::future::Future;
use std::sync::Arc;

use fitcoach_types::error::StoreError;
use fitcoach_types::storage::StorageKey;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Trait for string-valued key-value storage.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(&self, key: StorageKey) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Set a value for a key (upsert).
    fn set(&self, key: StorageKey, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete a key. No-op if key does not exist.
    fn delete(&self, key: StorageKey) -> impl Future<Output = Result<(), StoreError>> + Send;
}

impl<T: KvStore> KvStore for Arc<T> {
    fn get(&self, key: StorageKey) -> impl Future<Output = Result<Option<String>, StoreError>> + Send {
        (**self).get(key)
    }

    fn set(&self, key: StorageKey, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).set(key, value)
    }

    fn delete(&self, key: StorageKey) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).delete(key)
    }
}

/// Read and deserialize a JSON value.
pub async fn get_json<T, S>(store: &S, key: StorageKey) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KvStore,
{
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Serialization(format!("{key}: {e}"))),
        None => Ok(None),
    }
}

/// Serialize a value as JSON and store it.
pub async fn set_json<T, S>(store: &S, key: StorageKey, value: &T) -> Result<(), StoreError>
where
    T: Serialize + Sync,
    S: KvStore,
{
    let raw = serde_json::to_string(value)
        .map_err(|e| StoreError::Serialization(format!("{key}: {e}")))?;
    store.set(key, &raw).await
}
