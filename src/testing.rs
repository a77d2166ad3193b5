//! Testing utilities for slidetags
//!
//! This module provides helper types and functions for writing tests,
//! including a `TestStore` wrapper for temporary sled stores and fixture
//! builders for in-memory libraries.
//!
//! Only available when compiled with `cfg(test)`.

use crate::library::Library;
use crate::reference::Reference;
use crate::store::{MemoryStore, SledStore};
use crate::tags::TagSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Wrapper for a temporary sled store that cleans up on drop
///
/// The store lives in a fresh temporary directory, so parallel tests never
/// share state.
pub struct TestStore {
    path: PathBuf,
    store: SledStore,
    // Dropped after `store` so sled can flush before the directory goes away
    _dir: TempDir,
}

impl TestStore {
    /// Create a new test store named `name` inside a temporary directory
    ///
    /// # Panics
    /// Panics if the directory or the store cannot be created.
    pub fn new(name: impl AsRef<Path>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(name.as_ref());
        let store = SledStore::open(&path).expect("Failed to open test store");
        store.clear().expect("Failed to clear test store");

        Self { path, store, _dir: dir }
    }

    /// Get a reference to the underlying store
    #[must_use]
    pub const fn store(&self) -> &SledStore {
        &self.store
    }

    /// Get the path to the test store
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Build a tag set from string slices
#[must_use]
pub fn tag_set(tags: &[&str]) -> TagSet {
    tags.iter().map(|t| (*t).to_string()).collect()
}

/// In-memory library holding `entries` in order
///
/// Each entry is a reference and its comma-separated tags; `""` leaves the
/// reference untagged. Every tag also lands in the catalog.
///
/// # Panics
/// Panics if the in-memory store rejects a write.
#[must_use]
pub fn memory_library(entries: &[(&str, &str)]) -> Library<MemoryStore> {
    let library = Library::new(MemoryStore::new());
    for (reference, tags) in entries {
        let reference = Reference::from(*reference);
        library
            .references()
            .add(reference.clone())
            .expect("Failed to add reference");
        for tag in tags.split(',').filter(|t| !t.is_empty()) {
            library.tags().add_tag(&reference, tag).expect("Failed to tag reference");
        }
    }
    library
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::KeyValueStore;

    #[test]
    fn test_store_basic() {
        let test_store = TestStore::new("test_testing_store_basic");
        assert!(test_store.store().is_empty());
        assert!(test_store.path().exists());
    }

    #[test]
    fn test_store_cleanup() {
        let path = {
            let test_store = TestStore::new("test_testing_store_cleanup");
            test_store.store().put_bool("swipe", true).unwrap();
            test_store.path().to_path_buf()
        };

        assert!(!path.exists());
    }

    #[test]
    fn test_memory_library_fixture() {
        let library = memory_library(&[("content://m/1", "a,b"), ("content://m/2", "")]);

        assert_eq!(library.references().count().unwrap(), 2);
        let assignments = library.assignments().unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[&Reference::from("content://m/1")], tag_set(&["a", "b"]));
        assert!(library.tags().catalog().unwrap().is_superset(&tag_set(&["a", "b"])));
    }
}
