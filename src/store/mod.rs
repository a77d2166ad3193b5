//! Key-value store module for slidetags
//!
//! All persisted state (the reference list, tag assignments, the catalog and the
//! slideshow preferences) is kept in a flat key-value store holding a handful of
//! primitive kinds. The store is an injected collaborator: the engine never
//! reaches for a process-wide singleton, so every test can build its own.
//!
//! Two backends are provided:
//! - [`MemoryStore`]: an in-process map, used for ephemeral sessions and tests
//! - [`SledStore`]: a sled tree on disk, values encoded with bincode
//!
//! Writes are last-writer-wins per key. No atomicity is provided across keys.

use bincode::{Decode, Encode};
use std::collections::BTreeSet;

pub mod error;
pub mod keys;
mod memory;
mod sled_store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sled_store::SledStore;

/// A single persisted primitive
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    Int(i32),
    Long(i64),
    Bool(bool),
    StringSet(BTreeSet<String>),
}

/// Persisted mapping from string keys to primitive values
///
/// Implementors only supply [`get`](Self::get), [`put`](Self::put) and
/// [`remove`](Self::remove); the typed accessors are provided. A key holding a
/// value of a different kind reads back as absent.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read or the value cannot be decoded.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the value cannot be encoded or written.
    fn put(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Delete `key`, returning whether it was present
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend write fails.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError` if the backend read fails.
    fn contains_key(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the backend read fails.
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(match self.get(key)? {
            Some(Value::String(s)) => Some(s),
            _ => None,
        })
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the backend write fails.
    fn put_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.put(key, Value::String(value.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the backend read fails.
    fn get_int(&self, key: &str) -> Result<Option<i32>, StoreError> {
        Ok(match self.get(key)? {
            Some(Value::Int(v)) => Some(v),
            _ => None,
        })
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the backend write fails.
    fn put_int(&self, key: &str, value: i32) -> Result<(), StoreError> {
        self.put(key, Value::Int(value))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the backend read fails.
    fn get_long(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(match self.get(key)? {
            Some(Value::Long(v)) => Some(v),
            _ => None,
        })
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the backend write fails.
    fn put_long(&self, key: &str, value: i64) -> Result<(), StoreError> {
        self.put(key, Value::Long(value))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the backend read fails.
    fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        Ok(match self.get(key)? {
            Some(Value::Bool(v)) => Some(v),
            _ => None,
        })
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the backend write fails.
    fn put_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.put(key, Value::Bool(value))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the backend read fails.
    fn get_string_set(&self, key: &str) -> Result<Option<BTreeSet<String>>, StoreError> {
        Ok(match self.get(key)? {
            Some(Value::StringSet(set)) => Some(set),
            _ => None,
        })
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the backend write fails.
    fn put_string_set(&self, key: &str, value: BTreeSet<String>) -> Result<(), StoreError> {
        self.put(key, Value::StringSet(value))
    }
}
