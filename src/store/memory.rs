use super::{KeyValueStore, StoreError, Value};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory key-value store
///
/// Nothing survives the process. Used by tests and by hosts that persist
/// their preferences elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.values.read()?.len())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.values.read()?.is_empty())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.read()?.get(key).cloned())
    }

    fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.values.write()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.values.write()?.remove(key).is_some())
    }
}
