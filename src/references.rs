//! Reference list store
//!
//! Owns the ordered, deduplicated list of media references. The whole list is
//! persisted as one `;`-joined string under [`keys::REFERENCE_LIST`] and is
//! rewritten on every mutating call. Read-modify-write cycles are serialized by
//! a per-instance lock so concurrent adders (an auto-tagger and a UI edit, say)
//! cannot interleave partial writes.

use crate::reference::Reference;
use crate::store::{KeyValueStore, StoreError, keys};
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard};

const DELIMITER: &str = ";";

/// Store for the user's ordered reference list
pub struct ReferenceStore<S> {
    store: Arc<S>,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> ReferenceStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Full list in insertion order
    ///
    /// A missing or empty stored value yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn list(&self) -> Result<Vec<Reference>, StoreError> {
        let raw = self.store.get_string(keys::REFERENCE_LIST)?;
        Ok(parse_list(raw.as_deref().unwrap_or_default()))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.list()?.len())
    }

    /// Whether the exact reference is present (value equality, not identity)
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn contains(&self, reference: &Reference) -> Result<bool, StoreError> {
        Ok(self.list()?.contains(reference))
    }

    /// Reference at `index`, or `None` when out of range
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn get(&self, index: usize) -> Result<Option<Reference>, StoreError> {
        Ok(self.list()?.into_iter().nth(index))
    }

    /// Append `reference` unless an entry with the same derived identity exists
    ///
    /// Returns whether the list changed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn add(&self, reference: Reference) -> Result<bool, StoreError> {
        let _guard = self.lock()?;
        let mut list = self.list()?;
        if has_same_identity(&list, &reference) {
            debug!("skipping duplicate reference {reference}");
            return Ok(false);
        }
        debug!("adding reference {reference}");
        list.push(reference);
        self.save(&list)?;
        Ok(true)
    }

    /// Append every reference that does not collide with the list (including
    /// ones added earlier in the same call), persisting once
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn add_all<I>(&self, references: I) -> Result<bool, StoreError>
    where
        I: IntoIterator<Item = Reference>,
    {
        let _guard = self.lock()?;
        let mut list = self.list()?;
        let before = list.len();
        for reference in references {
            if !has_same_identity(&list, &reference) {
                list.push(reference);
            }
        }
        if list.len() == before {
            return Ok(false);
        }
        debug!("added {} reference(s)", list.len() - before);
        self.save(&list)?;
        Ok(true)
    }

    /// Remove the first exact match
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn remove(&self, reference: &Reference) -> Result<bool, StoreError> {
        let _guard = self.lock()?;
        let mut list = self.list()?;
        let Some(position) = list.iter().position(|r| r == reference) else {
            return Ok(false);
        };
        list.remove(position);
        debug!("removed reference {reference}");
        self.save(&list)?;
        Ok(true)
    }

    /// Remove every entry equal to any of `references`, persisting once
    ///
    /// Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn remove_all(&self, references: &[Reference]) -> Result<usize, StoreError> {
        if references.is_empty() {
            return Ok(0);
        }
        let _guard = self.lock()?;
        let mut list = self.list()?;
        let before = list.len();
        list.retain(|r| !references.contains(r));
        let removed = before - list.len();
        if removed > 0 {
            debug!("removed {removed} reference(s)");
            self.save(&list)?;
        }
        Ok(removed)
    }

    /// Replace `old` in place, or fall back to [`add`](Self::add) when absent
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn replace(&self, old: &Reference, new: Reference) -> Result<bool, StoreError> {
        {
            let _guard = self.lock()?;
            let mut list = self.list()?;
            if let Some(slot) = list.iter_mut().find(|r| **r == *old) {
                debug!("replacing reference {old} with {new}");
                *slot = new;
                self.save(&list)?;
                return Ok(true);
            }
        }
        self.add(new)
    }

    /// Stored "last shown" index, unwrapped
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn stored_index(&self) -> Result<i32, StoreError> {
        Ok(self.store.get_int(keys::LAST_INDEX)?.unwrap_or(0))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_current_index(&self, index: i32) -> Result<(), StoreError> {
        self.store.put_int(keys::LAST_INDEX, index)
    }

    /// Stored index wrapped into the full list's bounds
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn current_index(&self) -> Result<usize, StoreError> {
        Ok(wrap_index(self.stored_index()?, self.count()?))
    }

    /// Epoch milliseconds of the last slideshow advance, 0 if never set
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn last_update(&self) -> Result<i64, StoreError> {
        Ok(self.store.get_long(keys::LAST_UPDATE)?.unwrap_or(0))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_last_update(&self, millis: i64) -> Result<(), StoreError> {
        self.store.put_long(keys::LAST_UPDATE, millis)
    }

    /// Record the current time as the last update
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn touch_last_update(&self) -> Result<i64, StoreError> {
        let now = chrono::Utc::now().timestamp_millis();
        self.set_last_update(now)?;
        Ok(now)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        Ok(self.write_lock.lock()?)
    }

    fn save(&self, list: &[Reference]) -> Result<(), StoreError> {
        self.store.put_string(keys::REFERENCE_LIST, &join_list(list))
    }
}

/// Wrap a stored index into `[0, count)`
///
/// Negative indices and empty lists both yield 0.
#[must_use]
pub fn wrap_index(stored: i32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    usize::try_from(stored).map_or(0, |index| index % count)
}

fn has_same_identity(list: &[Reference], reference: &Reference) -> bool {
    list.iter().any(|existing| reference.same_identity(existing))
}

fn parse_list(raw: &str) -> Vec<Reference> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(DELIMITER).map(Reference::from).collect()
}

fn join_list(list: &[Reference]) -> String {
    list.iter()
        .map(Reference::as_str)
        .collect::<Vec<_>>()
        .join(DELIMITER)
}
