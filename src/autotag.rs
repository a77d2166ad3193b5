//! Name-based automatic tagging
//!
//! A catalog tag is suggested for a reference when the tag's normalized form
//! occurs inside the normalized display name of the reference. Normalizing
//! lowercases the text and keeps only ASCII letters and digits, so the tag
//! `Summer 2023` matches a file named `IMG_summer-2023_01.jpg`.
//!
//! Tags are only ever added; existing assignments are left alone.

use crate::reconcile::{NameResolver, display_name};
use crate::reference::Reference;
use crate::store::{KeyValueStore, StoreError};
use crate::tags::{TagSet, TagStore};
use log::debug;

/// Lowercase `text` and drop everything but ASCII letters and digits
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Catalog tags whose normalized form occurs in the normalized `name`
#[must_use]
pub fn suggested_tags(name: &str, catalog: &TagSet) -> TagSet {
    let name = normalize(name);
    catalog
        .iter()
        .filter(|tag| {
            let tag = normalize(tag);
            !tag.is_empty() && name.contains(&tag)
        })
        .cloned()
        .collect()
}

/// Add suggested catalog tags to each of `references`
///
/// References without a display name are skipped. Returns the number of
/// (reference, tag) assignments added.
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be read or written.
pub fn auto_tag<S, R>(tags: &TagStore<S>, references: &[Reference], resolver: &R) -> Result<usize, StoreError>
where
    S: KeyValueStore,
    R: NameResolver + ?Sized,
{
    let catalog = tags.catalog()?;
    auto_tag_from(tags, references, &catalog, resolver)
}

/// Like [`auto_tag`], but only `candidates` are considered instead of the whole catalog
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be read or written.
pub fn auto_tag_from<S, R>(
    tags: &TagStore<S>,
    references: &[Reference],
    candidates: &TagSet,
    resolver: &R,
) -> Result<usize, StoreError>
where
    S: KeyValueStore,
    R: NameResolver + ?Sized,
{
    let mut added = 0;

    for reference in references {
        let Some(name) = display_name(resolver, reference) else {
            continue;
        };
        let current = tags.tags_of(reference)?;
        for tag in suggested_tags(&name, candidates).difference(&current) {
            tags.add_tag(reference, tag)?;
            added += 1;
        }
    }

    debug!("auto-tag added {added} tag(s) across {} reference(s)", references.len());
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::LastSegmentResolver;
    use crate::store::MemoryStore;
    use crate::testing::tag_set;
    use std::sync::Arc;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("IMG_Summer-2023 (1).JPG"), "imgsummer20231jpg");
        assert_eq!(normalize("Café"), "caf");
        assert_eq!(normalize("--"), "");
    }

    #[test]
    fn test_suggested_tags() {
        let catalog = tag_set(&["Summer 2023", "beach", "Images", "!!"]);
        assert_eq!(
            suggested_tags("IMG_summer-2023_beach.jpg", &catalog),
            tag_set(&["Summer 2023", "beach"])
        );
        assert!(suggested_tags("", &catalog).is_empty());
    }

    #[test]
    fn test_auto_tag_adds_only_missing_tags() {
        let tags = TagStore::new(Arc::new(MemoryStore::new()));
        tags.add_to_catalog("beach").unwrap();
        tags.add_to_catalog("dog").unwrap();

        let beach = Reference::from("file:///p/beach_dog.jpg");
        let plain = Reference::from("file:///p/plain.jpg");
        tags.add_tag(&beach, "dog").unwrap();

        let added = auto_tag(&tags, &[beach.clone(), plain.clone()], &LastSegmentResolver).unwrap();

        assert_eq!(added, 1);
        assert_eq!(tags.tags_of(&beach).unwrap(), tag_set(&["beach", "dog"]));
        assert!(tags.tags_of(&plain).unwrap().is_empty());
    }

    #[test]
    fn test_auto_tag_uses_resolver_names() {
        let tags = TagStore::new(Arc::new(MemoryStore::new()));
        tags.add_to_catalog("Videos").unwrap();

        let clip = Reference::from("content://media/external/42");
        let resolver = |_: &Reference| Some("holiday_video.mp4".to_string());
        auto_tag(&tags, std::slice::from_ref(&clip), &resolver).unwrap();

        // "videos" is not contained in "holidayvideomp4"
        assert!(tags.tags_of(&clip).unwrap().is_empty());

        tags.add_to_catalog("holiday").unwrap();
        assert_eq!(auto_tag(&tags, std::slice::from_ref(&clip), &resolver).unwrap(), 1);
        assert_eq!(tags.tags_of(&clip).unwrap(), tag_set(&["holiday"]));
    }

    #[test]
    fn test_auto_tag_from_single_candidate() {
        let tags = TagStore::new(Arc::new(MemoryStore::new()));
        tags.add_to_catalog("beach").unwrap();
        tags.add_to_catalog("dog").unwrap();

        let photo = Reference::from("file:///p/beach_dog.jpg");
        let added = auto_tag_from(&tags, std::slice::from_ref(&photo), &tag_set(&["dog"]), &LastSegmentResolver).unwrap();

        assert_eq!(added, 1);
        assert_eq!(tags.tags_of(&photo).unwrap(), tag_set(&["dog"]));
    }
}
