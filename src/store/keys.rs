//! Fixed preference keys
//!
//! Every persisted value lives under one of these keys. Per-reference tag
//! assignments use [`tags_key`], which prefixes the reference's full textual
//! form with [`TAGS_PREFIX`].

use crate::reference::Reference;

pub const ORDERING: &str = "ordering";
pub const LAST_UPDATE: &str = "last_update";
pub const LAST_INDEX: &str = "last_index";
pub const REFERENCE_LIST: &str = "pick_images";
pub const SECONDS_BETWEEN: &str = "seconds";
pub const TOO_WIDE_IMAGES_RULE: &str = "too_wide_images_rule";
pub const ANTI_ALIAS: &str = "anti_alias";
pub const ANTI_ALIAS_WHILE_SCROLLING: &str = "anti_alias_scrolling";
pub const SWIPE: &str = "swipe";
pub const MUTE_VIDEOS: &str = "mute_videos";
pub const TRANSITION_DURATION: &str = "transition_duration";
/// Reserved for the legacy single-value tag map; never written.
pub const TAG_MAP: &str = "tag_map";
pub const ACTIVE_TAGS: &str = "active_tags";
pub const TAG_FILTER_MODE: &str = "tag_filter_mode";
pub const HIDDEN_TAGS: &str = "hidden_tags";
pub const AUTO_TAG_ENABLED: &str = "auto_tag_enabled";
pub const TAG_CATALOG: &str = "tag_catalog";

pub const TAGS_PREFIX: &str = "tags_";

/// Key holding the tag set of a single reference
#[must_use]
pub fn tags_key(reference: &Reference) -> String {
    format!("{TAGS_PREFIX}{}", reference.as_str())
}
