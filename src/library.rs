//! Renderer-facing facade
//!
//! [`Library`] ties the reference list, the tag store and the slideshow
//! settings to one shared key-value store and answers the questions a
//! slideshow renderer asks: what is visible, in which order, and which item
//! comes at a given position. Every query is computed fresh from the store.

use crate::SlideError;
use crate::autotag;
use crate::filter::visible_references;
use crate::media::{self, MediaKind};
use crate::ordering::display_order;
use crate::reconcile::{self, ImportReport, NameResolver};
use crate::reference::Reference;
use crate::references::{ReferenceStore, wrap_index};
use crate::settings::Settings;
use crate::snapshot::TagSnapshot;
use crate::store::{KeyValueStore, SledStore, StoreError};
use crate::tags::{TagAssignments, TagSet, TagStore};
use std::path::Path;
use std::sync::Arc;

/// The user's curated media list and its tag state
pub struct Library<S> {
    references: ReferenceStore<S>,
    tags: TagStore<S>,
    settings: Settings<S>,
}

impl Library<SledStore> {
    /// Open a library persisted in a sled database at `path`
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Ok(Self::new(SledStore::open(path)?))
    }
}

impl<S: KeyValueStore> Library<S> {
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<S>) -> Self {
        Self {
            references: ReferenceStore::new(Arc::clone(&store)),
            tags: TagStore::new(Arc::clone(&store)),
            settings: Settings::new(store),
        }
    }

    #[must_use]
    pub const fn references(&self) -> &ReferenceStore<S> {
        &self.references
    }

    #[must_use]
    pub const fn tags(&self) -> &TagStore<S> {
        &self.tags
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings<S> {
        &self.settings
    }

    /// Tag assignments of every listed reference that has tags
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn assignments(&self) -> Result<TagAssignments, StoreError> {
        self.tags.assignments(&self.references.list()?)
    }

    /// References passing the hidden-tag veto and the active filter, in list order
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn filtered_references(&self) -> Result<Vec<Reference>, StoreError> {
        let all = self.references.list()?;
        let assignments = self.tags.assignments(&all)?;
        Ok(visible_references(
            &all,
            |r| assignments.get(r).cloned().unwrap_or_default(),
            &self.tags.active_tags()?,
            &self.tags.hidden_tags()?,
            self.tags.filter_mode()?,
        ))
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn filtered_count(&self) -> Result<usize, StoreError> {
        Ok(self.filtered_references()?.len())
    }

    /// Visible reference at `index`, `None` when out of range
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn filtered_get(&self, index: usize) -> Result<Option<Reference>, StoreError> {
        Ok(self.filtered_references()?.into_iter().nth(index))
    }

    /// Visible references in display order (shuffled afresh for random ordering)
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn display_list(&self) -> Result<Vec<Reference>, StoreError> {
        Ok(display_order(self.filtered_references()?, self.settings.ordering()?))
    }

    /// Stored "last shown" index wrapped into the visible list; 0 when nothing is visible
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn current_index(&self) -> Result<usize, StoreError> {
        Ok(wrap_index(self.references.stored_index()?, self.filtered_count()?))
    }

    /// Remove `tag` from the catalog, every listed reference and the filter sets
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn remove_tag_from_catalog(&self, tag: &str) -> Result<(), StoreError> {
        self.tags.remove_from_catalog(tag, &self.references.list()?)
    }

    /// Rename `old` to `new` across the catalog, listed references and filter sets
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn rename_tag(&self, old: &str, new: &str) -> Result<(), StoreError> {
        self.tags.rename(old, new, &self.references.list()?)
    }

    /// Add catalog tags suggested by the display names of `references`
    ///
    /// Returns the number of tag assignments added.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn auto_tag<R: NameResolver + ?Sized>(&self, references: &[Reference], resolver: &R) -> Result<usize, StoreError> {
        autotag::auto_tag(&self.tags, references, resolver)
    }

    /// Auto-tag `references` with `tag` alone, when their display names contain it
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn auto_tag_only<R: NameResolver + ?Sized>(
        &self,
        tag: &str,
        references: &[Reference],
        resolver: &R,
    ) -> Result<usize, StoreError> {
        let candidates = TagSet::from([tag.to_string()]);
        autotag::auto_tag_from(&self.tags, references, &candidates, resolver)
    }

    /// Give `references` the reserved tag of the kind `classify` reports
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn tag_media_kinds<F>(&self, references: &[Reference], classify: F) -> Result<usize, StoreError>
    where
        F: Fn(&Reference) -> MediaKind,
    {
        media::tag_media_kinds(&self.tags, references, classify)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn export_snapshot<R: NameResolver + ?Sized>(&self, resolver: &R) -> Result<TagSnapshot, StoreError> {
        reconcile::export(&self.references, &self.tags, resolver)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or written.
    pub fn import_snapshot<R: NameResolver + ?Sized>(
        &self,
        snapshot: &TagSnapshot,
        resolver: &R,
    ) -> Result<ImportReport, StoreError> {
        reconcile::import(snapshot, &self.references, &self.tags, resolver)
    }

    /// Export the tag state straight to a JSON file
    ///
    /// # Errors
    ///
    /// Returns `SlideError` if the store cannot be read or the file cannot be written.
    pub fn export_to_file<R, P>(&self, resolver: &R, path: P) -> Result<TagSnapshot, SlideError>
    where
        R: NameResolver + ?Sized,
        P: AsRef<Path>,
    {
        let snapshot = self.export_snapshot(resolver)?;
        snapshot.write_to(path)?;
        Ok(snapshot)
    }

    /// Import the tag state from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `SlideError` if the file cannot be read or parsed, or the store update fails.
    pub fn import_from_file<R, P>(&self, resolver: &R, path: P) -> Result<ImportReport, SlideError>
    where
        R: NameResolver + ?Sized,
        P: AsRef<Path>,
    {
        let snapshot = TagSnapshot::read_from(path)?;
        Ok(self.import_snapshot(&snapshot, resolver)?)
    }
}
