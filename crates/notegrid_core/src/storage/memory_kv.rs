//! In-process key-value store for tests and UI previews.

use super::{KeyValueStore, StorageResult};
use std::collections::HashMap;

/// `HashMap`-backed store with no durability.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    items: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing any serialization.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
