//! In-memory key-value store used as the per-run session cache.

use dashmap::DashMap;
use fitcoach_types::error::StoreError;
use fitcoach_types::storage::StorageKey;

use super::KvStore;

/// Process-lifetime key-value store. Contents vanish when the client exits.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: DashMap<StorageKey, String>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(&key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key, value.to_string());
        Ok(())
    }

    async fn delete(&self, key: StorageKey) -> Result<(), StoreError> {
        self.entries.remove(&key);
        Ok(())
    }
}
