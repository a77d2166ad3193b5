//! Tag filter engine
//!
//! Computes the visible subset of the reference list from the active tags, the
//! hidden tags and a [`FilterMode`]. Evaluation is a pure read-only pass:
//!
//! 1. A reference carrying **any** hidden tag is dropped, whatever the mode.
//! 2. With no active tags, every remaining reference is visible.
//! 3. Otherwise the mode decides, comparing the reference's tags to the active set.
//!
//! `Xand` and `Xor` are deliberately not the textbook set operations: `Xand` is
//! the negation of `And`, and `Xor` means "exactly one active tag matches".

use crate::reference::Reference;
use crate::tags::TagSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a reference's tags are combined against the active tag set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Reference carries every active tag
    And,
    /// Reference carries at least one active tag
    #[default]
    Or,
    /// Reference is missing at least one active tag
    Xand,
    /// Reference carries exactly one active tag
    Xor,
}

impl FilterMode {
    pub const ALL: [Self; 4] = [Self::And, Self::Or, Self::Xand, Self::Xor];

    /// Stable machine value used for persistence and snapshots
    #[must_use]
    pub const fn as_value(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Xand => "xand",
            Self::Xor => "xor",
        }
    }

    /// Parse a machine value, `None` if unknown
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_value() == value)
    }

    /// Parse a machine value, falling back to [`FilterMode::Or`]
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    /// Whether a reference with `tags` passes this mode against `active`
    ///
    /// Callers handle the empty-`active` case before reaching here.
    #[must_use]
    pub fn matches(self, tags: &TagSet, active: &TagSet) -> bool {
        match self {
            Self::And => active.is_subset(tags),
            Self::Or => !active.is_disjoint(tags),
            Self::Xand => !active.is_subset(tags),
            Self::Xor => active.intersection(tags).take(2).count() == 1,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_value())
    }
}

/// Whether a reference carrying `tags` is vetoed by `hidden`
#[must_use]
pub fn is_hidden(tags: &TagSet, hidden: &TagSet) -> bool {
    !tags.is_disjoint(hidden)
}

/// Visible references, in list order
///
/// `tags_of` supplies each reference's tag set (empty when untagged).
pub fn visible_references<F>(
    all: &[Reference],
    mut tags_of: F,
    active: &TagSet,
    hidden: &TagSet,
    mode: FilterMode,
) -> Vec<Reference>
where
    F: FnMut(&Reference) -> TagSet,
{
    all.iter()
        .filter(|&reference| {
            let tags = tags_of(reference);
            if is_hidden(&tags, hidden) {
                return false;
            }
            active.is_empty() || mode.matches(&tags, active)
        })
        .cloned()
        .collect()
}
