use super::{KeyValueStore, StoreError, Value};
use sled::{Db, Tree};
use std::path::Path;

/// Key-value store persisted in a sled database
///
/// Every key lives in the `prefs` tree; values are the bincode encoding of
/// [`Value`], so the primitive kind survives a reopen.
pub struct SledStore {
    db: Db,
    prefs: Tree,
}

impl SledStore {
    /// Opens or creates a store at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use slidetags::store::SledStore;
    /// let store = SledStore::open("my_store").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database or its tree cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let prefs = db.open_tree("prefs")?;
        Ok(Self { db, prefs })
    }

    /// Flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    /// Remove every key
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if clearing the tree fails.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.prefs.clear()?;
        Ok(())
    }

    /// Number of keys in the store
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefs.is_empty()
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        match self.prefs.get(key.as_bytes())? {
            Some(bytes) => {
                let (value, _): (Value, usize) =
                    bincode::decode_from_slice(&bytes, bincode::config::standard())?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let encoded = bincode::encode_to_vec(&value, bincode::config::standard())?;
        self.prefs.insert(key.as_bytes(), encoded)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.prefs.remove(key.as_bytes())?.is_some())
    }
}

impl Drop for SledStore {
    fn drop(&mut self) {
        // Best-effort; callers needing durability call flush() themselves.
        let _ = self.db.flush();
    }
}
