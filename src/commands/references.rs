//! Reference list commands

use crate::reconcile::LastSegmentResolver;
use crate::store::KeyValueStore;
use crate::{Library, MediaKind, Reference, SlideError, output};
use colored::Colorize;
use std::collections::BTreeSet;

type Result<T> = std::result::Result<T, SlideError>;

/// Separator of the persisted list; a reference must not contain it
const LIST_DELIMITER: char = ';';

/// Validate raw command-line input as a reference
///
/// # Errors
/// Returns `InvalidInput` for empty input or input containing the list delimiter
pub fn parse_reference(raw: &str) -> Result<Reference> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SlideError::InvalidInput("Empty reference".into()));
    }
    if raw.contains(LIST_DELIMITER) {
        return Err(SlideError::InvalidInput(format!(
            "Reference '{raw}' contains '{LIST_DELIMITER}'"
        )));
    }
    Ok(Reference::from(raw))
}

/// Parse `raw` and require the reference to be in the list
///
/// # Errors
/// Returns `InvalidInput` for invalid or unlisted references
pub fn listed_reference<S: KeyValueStore>(library: &Library<S>, raw: &str) -> Result<Reference> {
    let reference = parse_reference(raw)?;
    if !library.references().contains(&reference)? {
        return Err(SlideError::InvalidInput(format!(
            "Reference '{reference}' is not in the list"
        )));
    }
    Ok(reference)
}

/// Execute the add command - append references and tag new ones with their
/// media kind, auto-tagging them too when enabled
///
/// # Errors
/// Returns an error if any reference is invalid or store operations fail
pub fn add<S: KeyValueStore>(library: &Library<S>, raw: &[String], quiet: bool) -> Result<()> {
    let references = raw.iter().map(|r| parse_reference(r)).collect::<Result<Vec<_>>>()?;
    let before: BTreeSet<Reference> = library.references().list()?.into_iter().collect();

    library.references().add_all(references)?;
    let added: Vec<Reference> = library
        .references()
        .list()?
        .into_iter()
        .filter(|r| !before.contains(r))
        .collect();

    if !quiet {
        println!("Added {} of {} reference(s)", added.len(), raw.len());
    }
    library.tag_media_kinds(&added, MediaKind::guess)?;

    if !added.is_empty() && library.tags().auto_tag_enabled()? {
        let tagged = library.auto_tag(&added, &LastSegmentResolver)?;
        if !quiet {
            println!("Auto-tagged {tagged} assignment(s)");
        }
    }
    Ok(())
}

/// Execute the autotag command over `raw`, or over the whole list when empty
///
/// With `only`, just that catalog tag is checked.
///
/// # Errors
/// Returns an error if a reference is not listed, `only` is not a catalog tag,
/// or store operations fail
pub fn autotag<S: KeyValueStore>(
    library: &Library<S>,
    raw: &[String],
    only: Option<&str>,
    quiet: bool,
) -> Result<()> {
    let references = if raw.is_empty() {
        library.references().list()?
    } else {
        raw.iter().map(|r| listed_reference(library, r)).collect::<Result<Vec<_>>>()?
    };

    let tagged = match only.map(str::trim) {
        Some(tag) => {
            if !library.tags().catalog()?.contains(tag) {
                return Err(SlideError::InvalidInput(format!("Tag '{tag}' is not in the catalog")));
            }
            library.auto_tag_only(tag, &references, &LastSegmentResolver)?
        }
        None => library.auto_tag(&references, &LastSegmentResolver)?,
    };
    if !quiet {
        println!("Auto-tagged {tagged} assignment(s) across {} reference(s)", references.len());
    }
    Ok(())
}

/// Execute the remove command
///
/// # Errors
/// Returns an error if store operations fail
pub fn remove<S: KeyValueStore>(library: &Library<S>, raw: &[String], quiet: bool) -> Result<()> {
    let references: Vec<Reference> = raw.iter().map(|r| Reference::from(r.trim())).collect();
    let removed = library.references().remove_all(&references)?;
    if !quiet {
        println!("Removed {removed} reference(s)");
    }
    Ok(())
}

/// Execute the replace command
///
/// # Errors
/// Returns an error if the new reference is invalid or store operations fail
pub fn replace<S: KeyValueStore>(library: &Library<S>, old: &str, new: &str, quiet: bool) -> Result<()> {
    let old = Reference::from(old.trim());
    let new = parse_reference(new)?;
    let in_place = library.references().contains(&old)?;

    let changed = library.references().replace(&old, new.clone())?;
    if !quiet {
        match (in_place, changed) {
            (true, _) => println!("Replaced {old} with {new}"),
            (false, true) => println!("{old} not in list, appended {new}"),
            (false, false) => println!("{old} not in list and {new} already present"),
        }
    }
    Ok(())
}

/// Execute the list command - every reference, coloured by current visibility
///
/// # Errors
/// Returns an error if store operations fail
pub fn list<S: KeyValueStore>(library: &Library<S>, quiet: bool) -> Result<()> {
    let all = library.references().list()?;
    if all.is_empty() {
        if !quiet {
            println!("No references in list.");
        }
        return Ok(());
    }

    let visible: BTreeSet<Reference> = library.filtered_references()?.into_iter().collect();
    let assignments = library.assignments()?;

    if !quiet {
        println!("{} reference(s), {} visible:", all.len(), visible.len());
    }
    for reference in &all {
        if quiet {
            println!("{reference}");
            continue;
        }
        let tags = assignments.get(reference).cloned().unwrap_or_default();
        println!(
            "  {} [{}]",
            output::colorize_reference(reference, visible.contains(reference)),
            output::tag_list(&tags)
        );
    }
    Ok(())
}

/// Execute the show command - visible references in display order
///
/// # Errors
/// Returns an error if store operations fail
pub fn show<S: KeyValueStore>(library: &Library<S>, plain: bool, quiet: bool) -> Result<()> {
    let shown = library.display_list()?;
    if shown.is_empty() {
        if !quiet {
            println!("Nothing to show with the current filter.");
        }
        return Ok(());
    }

    if !quiet {
        println!(
            "{} ({} ordering, current index {})",
            "Slideshow".bold(),
            library.settings().ordering()?,
            library.current_index()?
        );
    }
    let assignments = library.assignments()?;
    for reference in &shown {
        if plain || quiet {
            println!("{reference}");
        } else {
            let tags = assignments.get(reference).cloned().unwrap_or_default();
            println!("{}", output::reference_with_tags(reference, &tags, false));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{IMAGES_TAG, VIDEOS_TAG};
    use crate::testing::{memory_library, tag_set};

    #[test]
    fn test_parse_reference() {
        assert_eq!(parse_reference(" content://m/1 ").unwrap(), Reference::from("content://m/1"));
        assert!(matches!(parse_reference("  "), Err(SlideError::InvalidInput(_))));
        assert!(matches!(parse_reference("a;b"), Err(SlideError::InvalidInput(_))));
    }

    #[test]
    fn test_add_skips_duplicates_and_rejects_bad_input() {
        let library = memory_library(&[("file:///a/one.jpg", "")]);

        add(&library, &["content://x/one.jpg".into(), "file:///a/two.jpg".into()], true).unwrap();
        assert_eq!(library.references().count().unwrap(), 2);

        assert!(add(&library, &["file:///a/three.jpg".into(), "x;y".into()], true).is_err());
        assert_eq!(library.references().count().unwrap(), 2);
    }

    #[test]
    fn test_add_auto_tags_new_references() {
        let library = memory_library(&[("file:///a/beach_old.jpg", "")]);
        library.tags().add_to_catalog("beach").unwrap();
        library.tags().set_auto_tag_enabled(true).unwrap();

        add(&library, &["file:///a/beach_new.jpg".into()], true).unwrap();

        let assignments = library.assignments().unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(
            assignments[&Reference::from("file:///a/beach_new.jpg")],
            tag_set(&["Images", "beach"])
        );
    }

    #[test]
    fn test_add_tags_media_kind() {
        let library = memory_library(&[]);
        add(&library, &["file:///a/one.jpg".into(), "file:///a/clip.mp4".into()], true).unwrap();

        let assignments = library.assignments().unwrap();
        assert_eq!(assignments[&Reference::from("file:///a/one.jpg")], tag_set(&[IMAGES_TAG]));
        assert_eq!(assignments[&Reference::from("file:///a/clip.mp4")], tag_set(&[VIDEOS_TAG]));
    }

    #[test]
    fn test_autotag_whole_list() {
        let library = memory_library(&[("file:///a/Sunset_1.jpg", ""), ("file:///a/x.jpg", "sunset")]);
        autotag(&library, &[], None, true).unwrap();

        let reference = Reference::from("file:///a/Sunset_1.jpg");
        assert_eq!(library.tags().tags_of(&reference).unwrap(), tag_set(&["sunset"]));
    }

    #[test]
    fn test_autotag_rejects_unlisted_reference() {
        let library = memory_library(&[("file:///a/listed.jpg", ""), ("file:///a/x.jpg", "beach")]);

        let result = autotag(&library, &["file:///elsewhere/beach.jpg".into()], None, true);
        assert!(matches!(result, Err(SlideError::InvalidInput(_))));

        let unlisted = Reference::from("file:///elsewhere/beach.jpg");
        assert!(!library.tags().has_entry(&unlisted).unwrap());

        library.remove_tag_from_catalog("beach").unwrap();
        assert!(library.tags().tags_of(&unlisted).unwrap().is_empty());
    }

    #[test]
    fn test_autotag_single_tag() {
        let library = memory_library(&[("file:///a/beach_dog.jpg", ""), ("file:///a/x.jpg", "beach,dog")]);

        autotag(&library, &["file:///a/beach_dog.jpg".into()], Some("dog"), true).unwrap();

        let reference = Reference::from("file:///a/beach_dog.jpg");
        assert_eq!(library.tags().tags_of(&reference).unwrap(), tag_set(&["dog"]));
        assert!(matches!(
            autotag(&library, &[], Some("moon"), true),
            Err(SlideError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_remove_and_replace() {
        let library = memory_library(&[("content://m/1", ""), ("content://m/2", "")]);

        replace(&library, "content://m/1", "content://m/9", true).unwrap();
        assert_eq!(
            library.references().list().unwrap(),
            vec![Reference::from("content://m/9"), Reference::from("content://m/2")]
        );

        remove(&library, &["content://m/2".into(), "content://m/404".into()], true).unwrap();
        assert_eq!(library.references().list().unwrap(), vec![Reference::from("content://m/9")]);
    }

    #[test]
    fn test_list_and_show_on_empty_library() {
        let library = memory_library(&[]);
        list(&library, true).unwrap();
        show(&library, false, true).unwrap();
    }
}
