//! Tag store
//!
//! Owns the global tag catalog, the per-reference tag assignments and the
//! filter state (active tags, hidden tags, filter mode, auto-tag flag).
//!
//! Assignments are persisted one key per reference (`tags_<reference>`) holding
//! a string set; an assignment that becomes empty is deleted rather than kept
//! as an empty set. Internally they are surfaced as a [`TagAssignments`] map so
//! callers never see the flat key encoding.
//!
//! The two reserved tags, [`IMAGES_TAG`] and [`VIDEOS_TAG`], are always part of
//! the effective catalog and are never written to, removed from or renamed in
//! the stored catalog.
//!
//! Cascading operations ([`TagStore::remove_from_catalog`], [`TagStore::rename`])
//! are a sequence of independent key writes. They are not atomic: a failure
//! part-way leaves the earlier steps applied.

use crate::filter::FilterMode;
use crate::reference::Reference;
use crate::store::{KeyValueStore, StoreError, keys};
use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// A set of tag names
pub type TagSet = BTreeSet<String>;

/// Reference -> tag set, only for references with at least one tag
pub type TagAssignments = BTreeMap<Reference, TagSet>;

pub const IMAGES_TAG: &str = "Images";
pub const VIDEOS_TAG: &str = "Videos";
pub const RESERVED_TAGS: [&str; 2] = [IMAGES_TAG, VIDEOS_TAG];

/// Whether `tag` is one of the implicit catalog entries
#[must_use]
pub fn is_reserved(tag: &str) -> bool {
    RESERVED_TAGS.contains(&tag)
}

/// Store for tags, the catalog and filter state
pub struct TagStore<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> TagStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Tags assigned to `reference`, empty if none
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn tags_of(&self, reference: &Reference) -> Result<TagSet, StoreError> {
        Ok(self
            .store
            .get_string_set(&keys::tags_key(reference))?
            .unwrap_or_default())
    }

    /// Whether a persisted assignment entry exists for `reference`
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn has_entry(&self, reference: &Reference) -> Result<bool, StoreError> {
        self.store.contains_key(&keys::tags_key(reference))
    }

    /// Assign `tag` to `reference` and make sure the catalog knows it
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn add_tag(&self, reference: &Reference, tag: &str) -> Result<(), StoreError> {
        let key = keys::tags_key(reference);
        let mut tags = self.store.get_string_set(&key)?.unwrap_or_default();
        tags.insert(tag.to_string());
        self.store.put_string_set(&key, tags)?;
        debug!("tagged {reference} with '{tag}'");
        self.add_to_catalog(tag)?;
        Ok(())
    }

    /// Unassign `tag` from `reference`, deleting the entry once it is empty
    ///
    /// Returns whether the tag was assigned.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn remove_tag(&self, reference: &Reference, tag: &str) -> Result<bool, StoreError> {
        let key = keys::tags_key(reference);
        let Some(mut tags) = self.store.get_string_set(&key)? else {
            return Ok(false);
        };
        if !tags.remove(tag) {
            return Ok(false);
        }
        if tags.is_empty() {
            self.store.remove(&key)?;
        } else {
            self.store.put_string_set(&key, tags)?;
        }
        debug!("untagged '{tag}' from {reference}");
        Ok(true)
    }

    /// Tag assignments of every reference in `references` that has any
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn assignments(&self, references: &[Reference]) -> Result<TagAssignments, StoreError> {
        let mut result = TagAssignments::new();
        for reference in references {
            let tags = self.tags_of(reference)?;
            if !tags.is_empty() {
                result.insert(reference.clone(), tags);
            }
        }
        Ok(result)
    }

    /// Stored catalog plus the reserved tags
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn catalog(&self) -> Result<TagSet, StoreError> {
        let mut catalog = self.stored_catalog()?;
        catalog.extend(RESERVED_TAGS.iter().map(|t| (*t).to_string()));
        Ok(catalog)
    }

    /// Add `tag` to the stored catalog; reserved tags are ignored
    ///
    /// Returns whether the catalog changed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn add_to_catalog(&self, tag: &str) -> Result<bool, StoreError> {
        if is_reserved(tag) {
            return Ok(false);
        }
        let mut catalog = self.stored_catalog()?;
        if !catalog.insert(tag.to_string()) {
            return Ok(false);
        }
        self.store.put_string_set(keys::TAG_CATALOG, catalog)?;
        debug!("catalog gained '{tag}'");
        Ok(true)
    }

    /// Remove `tag` everywhere: catalog, assignments of `references`, and the
    /// active and hidden sets
    ///
    /// Reserved tags are left alone.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any step fails to read or write; earlier steps stay applied.
    pub fn remove_from_catalog(&self, tag: &str, references: &[Reference]) -> Result<(), StoreError> {
        if is_reserved(tag) {
            debug!("refusing to remove reserved tag '{tag}'");
            return Ok(());
        }

        let mut catalog = self.stored_catalog()?;
        if catalog.remove(tag) {
            self.store.put_string_set(keys::TAG_CATALOG, catalog)?;
        }

        for reference in references {
            self.remove_tag(reference, tag)?;
        }

        let mut active = self.active_tags()?;
        if active.remove(tag) {
            self.set_active_tags(active)?;
        }

        let mut hidden = self.hidden_tags()?;
        if hidden.remove(tag) {
            self.set_hidden_tags(hidden)?;
        }

        debug!("removed tag '{tag}' from catalog");
        Ok(())
    }

    /// Rename `old` to `new` in the catalog, in the assignments of
    /// `references`, and in the active and hidden sets
    ///
    /// No-op when the names are equal or `old` is reserved.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any step fails to read or write; earlier steps stay applied.
    pub fn rename(&self, old: &str, new: &str, references: &[Reference]) -> Result<(), StoreError> {
        if old == new || is_reserved(old) {
            return Ok(());
        }

        let mut catalog = self.stored_catalog()?;
        if catalog.remove(old) {
            if !is_reserved(new) {
                catalog.insert(new.to_string());
            }
            self.store.put_string_set(keys::TAG_CATALOG, catalog)?;
        }

        for reference in references {
            if self.tags_of(reference)?.contains(old) {
                self.remove_tag(reference, old)?;
                self.add_tag(reference, new)?;
            }
        }

        let active = self.active_tags()?;
        if active.contains(old) {
            self.set_active_tags(renamed(active, old, new))?;
        }

        let hidden = self.hidden_tags()?;
        if hidden.contains(old) {
            self.set_hidden_tags(renamed(hidden, old, new))?;
        }

        debug!("renamed tag '{old}' to '{new}'");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn active_tags(&self) -> Result<TagSet, StoreError> {
        Ok(self.store.get_string_set(keys::ACTIVE_TAGS)?.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_active_tags(&self, tags: TagSet) -> Result<(), StoreError> {
        self.store.put_string_set(keys::ACTIVE_TAGS, tags)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn hidden_tags(&self) -> Result<TagSet, StoreError> {
        Ok(self.store.get_string_set(keys::HIDDEN_TAGS)?.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_hidden_tags(&self, tags: TagSet) -> Result<(), StoreError> {
        self.store.put_string_set(keys::HIDDEN_TAGS, tags)
    }

    /// Persisted filter mode; absent or unknown values read as [`FilterMode::Or`]
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn filter_mode(&self) -> Result<FilterMode, StoreError> {
        Ok(self
            .store
            .get_string(keys::TAG_FILTER_MODE)?
            .map_or_else(FilterMode::default, |v| FilterMode::from_value(&v)))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_filter_mode(&self, mode: FilterMode) -> Result<(), StoreError> {
        self.store.put_string(keys::TAG_FILTER_MODE, mode.as_value())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn auto_tag_enabled(&self) -> Result<bool, StoreError> {
        Ok(self.store.get_bool(keys::AUTO_TAG_ENABLED)?.unwrap_or(false))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_auto_tag_enabled(&self, enabled: bool) -> Result<(), StoreError> {
        self.store.put_bool(keys::AUTO_TAG_ENABLED, enabled)
    }

    fn stored_catalog(&self) -> Result<TagSet, StoreError> {
        Ok(self.store.get_string_set(keys::TAG_CATALOG)?.unwrap_or_default())
    }
}

fn renamed(mut set: TagSet, old: &str, new: &str) -> TagSet {
    set.remove(old);
    set.insert(new.to_string());
    set
}
