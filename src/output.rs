//! Output formatting for CLI display
//!
//! This module provides utilities for formatting references, tags and
//! settings in the CLI.

use crate::reference::Reference;
use crate::tags::TagSet;
use colored::Colorize;

/// Join a tag set for display, `(none)` when empty
#[must_use]
pub fn tag_list(tags: &TagSet) -> String {
    if tags.is_empty() {
        "(none)".to_string()
    } else {
        tags.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

/// Format a reference with its tags for display
#[must_use]
pub fn reference_with_tags(reference: &Reference, tags: &TagSet, quiet: bool) -> String {
    if quiet {
        reference.to_string()
    } else if tags.is_empty() {
        format!("  {reference} (no tags)")
    } else {
        format!("  {} [{}]", reference, tag_list(tags))
    }
}

/// Color a reference by whether the current filter shows it
#[must_use]
pub fn colorize_reference(reference: &Reference, visible: bool) -> String {
    if visible {
        reference.as_str().green().to_string()
    } else {
        reference.as_str().dimmed().to_string()
    }
}

/// Format a tag with usage count; reserved tags are marked
#[must_use]
pub fn tag_with_count(tag: &str, count: usize, reserved: bool, quiet: bool) -> String {
    if quiet {
        tag.to_string()
    } else if reserved {
        format!("  {} (reserved, used by {count} reference(s))", tag.cyan())
    } else {
        format!("  {tag} (used by {count} reference(s))")
    }
}

/// Format one `key = value` line
#[must_use]
pub fn setting(key: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<28} {value}", key.bold())
}
