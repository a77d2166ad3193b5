//! Slidetags - a tag-filtered media reference list for slideshows
//!
//! This library keeps the user's curated list of media references, the tags
//! attached to them and the slideshow preferences in a single key-value
//! store, and computes the visible, ordered subset a slideshow renderer
//! should display. Tag state can be exported to and imported from a JSON
//! snapshot that survives reference identifiers changing between devices.

use thiserror::Error;

pub mod autotag;
pub mod cli;
pub mod commands;
pub mod config;
pub mod filter;
pub mod library;
pub mod media;
pub mod ordering;
pub mod output;
pub mod reconcile;
pub mod reference;
pub mod references;
pub mod settings;
pub mod snapshot;
pub mod store;
pub mod tags;

#[cfg(test)]
pub mod testing;

pub use filter::FilterMode;
pub use library::Library;
pub use media::MediaKind;
pub use ordering::Ordering;
pub use reference::Reference;
pub use tags::TagSet;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum SlideError {
    /// Key-value store error
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
    /// Snapshot file error
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] snapshot::SnapshotError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
