//! Store-specific error types
//!
//! This module defines the errors that can occur while reading or writing the
//! persisted key-value store backing the reference list and tag state.
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`**: Failures when deserializing a stored value
//! - **`EncodeError`**: Failures when serializing a value for storage
//! - **`Poisoned`**: A lock guarding the store was poisoned by a panicking writer

use thiserror::Error;

/// Key-value store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Represents a sled database error
    #[error("Store error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding value: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding value: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// A lock guarding store state was poisoned
    #[error("Store lock poisoned: {0}")]
    Poisoned(String),
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::Poisoned(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
