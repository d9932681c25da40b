//! In-memory key-value storage for testing and ephemeral sessions

use super::{KeyValueStorage, StorageError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory storage implementation
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the store persisted.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    /// Create an empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with one entry
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        if let Ok(mut items) = storage.items.write() {
            items.insert(key.into(), value.into());
        }
        storage
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self
            .items
            .read()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;

        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;

        items.insert(key.to_string(), value.to_string());

        Ok(())
    }}
