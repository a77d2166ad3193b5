//! Media kind classification
//!
//! Every listed reference carries the reserved tag of its media kind,
//! [`IMAGES_TAG`] or [`VIDEOS_TAG`]. Hosts that know the MIME type supply
//! their own classifier; otherwise the kind is guessed from the extension of
//! the last path segment. Anything not recognised as video counts as an image.

use crate::reference::Reference;
use crate::store::{KeyValueStore, StoreError};
use crate::tags::{IMAGES_TAG, TagStore, VIDEOS_TAG};
use log::debug;

/// Extensions treated as video
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mkv", "webm", "mov", "avi", "wmv", "flv", "3gp", "3g2", "mpeg", "mpg", "ogv", "ts", "m2ts",
    "mts",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Kind for a MIME type; only `video/*` is video
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        if mime.trim().to_ascii_lowercase().starts_with("video/") {
            Self::Video
        } else {
            Self::Image
        }
    }

    /// Kind guessed from the extension of the reference's last path segment
    #[must_use]
    pub fn guess(reference: &Reference) -> Self {
        let extension = reference
            .last_path_segment()
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()));

        match extension {
            Some(ext) if VIDEO_EXTENSIONS.contains(&ext.as_str()) => Self::Video,
            _ => Self::Image,
        }
    }

    /// Reserved tag naming this kind
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Image => IMAGES_TAG,
            Self::Video => VIDEOS_TAG,
        }
    }
}

/// Give each of `references` the reserved tag of its kind when missing
///
/// Returns the number of references that gained a tag.
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be read or written.
pub fn tag_media_kinds<S, F>(tags: &TagStore<S>, references: &[Reference], classify: F) -> Result<usize, StoreError>
where
    S: KeyValueStore,
    F: Fn(&Reference) -> MediaKind,
{
    let mut tagged = 0;
    for reference in references {
        let tag = classify(reference).tag();
        if !tags.tags_of(reference)?.contains(tag) {
            tags.add_tag(reference, tag)?;
            tagged += 1;
        }
    }
    debug!("media kind tags added to {tagged} of {} reference(s)", references.len());
    Ok(tagged)
}
