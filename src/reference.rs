//! Media reference type
//!
//! A [`Reference`] is the opaque, URI-like identifier of one media item. The
//! list store deduplicates references by their *derived identity*: the last
//! path segment, percent-decoded. References without a path segment (opaque
//! URIs such as `mailto:x`, bare authorities) fall back to full-string equality.
//!
//! # Examples
//!
//! ```
//! use slidetags::Reference;
//!
//! let a = Reference::new("content://media/external/images/media/1234");
//! let b = Reference::new("content://other.provider/files/1234");
//! assert_eq!(a.last_path_segment().as_deref(), Some("1234"));
//! assert!(a.same_identity(&b));
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identifier of a single media item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Last non-empty segment of the path component, percent-decoded
    ///
    /// Query and fragment are ignored. Returns `None` for opaque URIs and for
    /// references whose path has no segments.
    #[must_use]
    pub fn last_path_segment(&self) -> Option<String> {
        let path = path_component(&self.0)?;
        let segment = path.split('/').filter(|s| !s.is_empty()).next_back()?;
        Some(percent_decode(segment).into_owned())
    }

    /// Whether two references share a derived identity
    ///
    /// Compares last path segments; when this reference has none, compares the
    /// full textual form instead.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        match self.last_path_segment() {
            Some(id) => other.last_path_segment().is_some_and(|o| o == id),
            None => self == other,
        }
    }
}

/// Decode `%XX` escapes, leaving the input untouched when it is not valid UTF-8
pub(crate) fn percent_decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains('%') {
        return Cow::Borrowed(raw);
    }
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

fn path_component(raw: &str) -> Option<&str> {
    let raw = raw.split(['?', '#']).next().unwrap_or(raw);

    if let Some((_, rest)) = raw.split_once("://") {
        // authority runs up to the first slash
        return rest.find('/').map(|i| &rest[i..]);
    }

    match scheme_end(raw) {
        Some(colon) if raw[colon + 1..].starts_with('/') => Some(&raw[colon + 1..]),
        Some(_) => None,
        None => Some(raw),
    }
}

/// Byte index of the colon ending a URI scheme, if `raw` starts with one
fn scheme_end(raw: &str) -> Option<usize> {
    let colon = raw.find(':')?;
    let scheme = &raw[..colon];
    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid = starts_alpha && chars.all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
    valid.then_some(colon)
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Reference {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Reference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_segment_of_content_uri() {
        let r = Reference::new("content://media/external/images/media/1234");
        assert_eq!(r.last_path_segment().as_deref(), Some("1234"));
    }

    #[test]
    fn test_last_segment_is_decoded_after_splitting() {
        let r = Reference::new(
            "content://com.android.externalstorage.documents/document/primary%3APictures%2Fbeach.jpg",
        );
        assert_eq!(r.last_path_segment().as_deref(), Some("primary:Pictures/beach.jpg"));
    }

    #[test]
    fn test_last_segment_ignores_trailing_slash_query_and_fragment() {
        assert_eq!(
            Reference::new("https://host/a/b/?x=1").last_path_segment().as_deref(),
            Some("b")
        );
        assert_eq!(
            Reference::new("file:///sdcard/pic.png#frag").last_path_segment().as_deref(),
            Some("pic.png")
        );
    }

    #[test]
    fn test_plain_path() {
        let r = Reference::new("/storage/emulated/0/DCIM/img.jpg");
        assert_eq!(r.last_path_segment().as_deref(), Some("img.jpg"));
        assert_eq!(Reference::new("img.jpg").last_path_segment().as_deref(), Some("img.jpg"));
    }

    #[test]
    fn test_no_segment() {
        assert_eq!(Reference::new("mailto:someone").last_path_segment(), None);
        assert_eq!(Reference::new("content://media").last_path_segment(), None);
        assert_eq!(Reference::new("").last_path_segment(), None);
    }

    #[test]
    fn test_same_identity_by_segment() {
        let a = Reference::new("content://a/images/7");
        let b = Reference::new("content://b/videos/7");
        let c = Reference::new("content://a/images/8");
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
    }

    #[test]
    fn test_same_identity_without_segment_uses_equality() {
        let a = Reference::new("content://media");
        assert!(a.same_identity(&Reference::new("content://media")));
        assert!(!a.same_identity(&Reference::new("content://other")));
        assert!(!a.same_identity(&Reference::new("content://x/media")));
    }

    #[test]
    fn test_display_and_conversions() {
        let r: Reference = "file:///a/b.jpg".into();
        assert_eq!(r.to_string(), "file:///a/b.jpg");
        assert_eq!(r.as_ref(), "file:///a/b.jpg");
        assert_eq!(r.clone().into_string(), "file:///a/b.jpg");
    }
}
