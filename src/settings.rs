//! Slideshow preferences
//!
//! Typed accessors for the renderer-facing preferences that live next to the
//! tag state in the key-value store. Malformed or unknown stored values never
//! surface as errors: each accessor falls back to its documented default.
//!
//! Enumerations carry only a stable machine value. Human-readable labels are
//! supplied by the host through a [`LabelTable`] keyed by the same enumeration.

use crate::ordering::Ordering;
use crate::store::{KeyValueStore, StoreError, keys};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

pub const DEFAULT_SECONDS_BETWEEN: i32 = 15;
pub const DEFAULT_TRANSITION_DURATION_MS: i32 = 1000;

/// What the renderer does with images wider than the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooWideImagesRule {
    ScrollForward,
    ScrollBackward,
    #[default]
    ScaleDown,
    ScaleUp,
}

impl TooWideImagesRule {
    pub const ALL: [Self; 4] = [
        Self::ScrollForward,
        Self::ScrollBackward,
        Self::ScaleDown,
        Self::ScaleUp,
    ];

    #[must_use]
    pub const fn as_value(self) -> &'static str {
        match self {
            Self::ScrollForward => "scroll_forward",
            Self::ScrollBackward => "scroll_backward",
            Self::ScaleDown => "scale_down",
            Self::ScaleUp => "scale_up",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_value() == value)
    }
}

impl fmt::Display for TooWideImagesRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_value())
    }
}

/// Host-supplied display labels for an enumeration
#[derive(Debug, Clone)]
pub struct LabelTable<K> {
    labels: HashMap<K, String>,
}

impl<K: Eq + Hash> LabelTable<K> {
    pub fn new<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        L: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(|(k, l)| (k, l.into())).collect(),
        }
    }

    #[must_use]
    pub fn label(&self, key: &K) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

/// Typed view over the slideshow preferences
pub struct Settings<S> {
    store: Arc<S>,
}

impl<S: KeyValueStore> Settings<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Display ordering; absent or unknown values read as [`Ordering::Selection`]
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn ordering(&self) -> Result<Ordering, StoreError> {
        Ok(self
            .store
            .get_string(keys::ORDERING)?
            .and_then(|v| Ordering::parse(&v))
            .unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_ordering(&self, ordering: Ordering) -> Result<(), StoreError> {
        self.store.put_string(keys::ORDERING, ordering.as_value())
    }

    /// Seconds between slides, stored as a decimal string
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn seconds_between(&self) -> Result<i32, StoreError> {
        self.numeric_string(keys::SECONDS_BETWEEN, DEFAULT_SECONDS_BETWEEN)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_seconds_between(&self, seconds: i32) -> Result<(), StoreError> {
        self.store.put_string(keys::SECONDS_BETWEEN, &seconds.to_string())
    }

    /// Transition duration in milliseconds, stored as a decimal string
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn transition_duration(&self) -> Result<i32, StoreError> {
        self.numeric_string(keys::TRANSITION_DURATION, DEFAULT_TRANSITION_DURATION_MS)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_transition_duration(&self, millis: i32) -> Result<(), StoreError> {
        self.store.put_string(keys::TRANSITION_DURATION, &millis.to_string())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn too_wide_images_rule(&self) -> Result<TooWideImagesRule, StoreError> {
        Ok(self
            .store
            .get_string(keys::TOO_WIDE_IMAGES_RULE)?
            .and_then(|v| TooWideImagesRule::parse(&v))
            .unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_too_wide_images_rule(&self, rule: TooWideImagesRule) -> Result<(), StoreError> {
        self.store.put_string(keys::TOO_WIDE_IMAGES_RULE, rule.as_value())
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn anti_alias(&self) -> Result<bool, StoreError> {
        self.flag(keys::ANTI_ALIAS)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_anti_alias(&self, value: bool) -> Result<(), StoreError> {
        self.store.put_bool(keys::ANTI_ALIAS, value)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn anti_alias_while_scrolling(&self) -> Result<bool, StoreError> {
        self.flag(keys::ANTI_ALIAS_WHILE_SCROLLING)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_anti_alias_while_scrolling(&self, value: bool) -> Result<(), StoreError> {
        self.store.put_bool(keys::ANTI_ALIAS_WHILE_SCROLLING, value)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn swipe_to_change(&self) -> Result<bool, StoreError> {
        self.flag(keys::SWIPE)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_swipe_to_change(&self, value: bool) -> Result<(), StoreError> {
        self.store.put_bool(keys::SWIPE, value)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    pub fn mute_videos(&self) -> Result<bool, StoreError> {
        self.flag(keys::MUTE_VIDEOS)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be written.
    pub fn set_mute_videos(&self, value: bool) -> Result<(), StoreError> {
        self.store.put_bool(keys::MUTE_VIDEOS, value)
    }

    // All boolean preferences default to on.
    fn flag(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.store.get_bool(key)?.unwrap_or(true))
    }

    fn numeric_string(&self, key: &str, default: i32) -> Result<i32, StoreError> {
        let Some(raw) = self.store.get_string(key)? else {
            return Ok(default);
        };
        Ok(raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring malformed value '{raw}' for '{key}', using {default}");
            default
        }))
    }
}
