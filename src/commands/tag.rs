//! Tag and untag commands

use crate::commands::references::{listed_reference, parse_reference};
use crate::store::KeyValueStore;
use crate::{Library, SlideError};

type Result<T> = std::result::Result<T, SlideError>;

fn clean_tags(tags: &[String]) -> Result<Vec<&str>> {
    let cleaned: Vec<&str> = tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).collect();
    if cleaned.is_empty() {
        return Err(SlideError::InvalidInput("No tags provided".into()));
    }
    Ok(cleaned)
}

/// Execute the tag command - add tags to a listed reference
///
/// New tags also join the catalog.
///
/// # Errors
/// Returns an error if the reference is not listed, no tags are given, or store operations fail
pub fn execute<S: KeyValueStore>(library: &Library<S>, reference: &str, tags: &[String], quiet: bool) -> Result<()> {
    let reference = listed_reference(library, reference)?;
    let tags = clean_tags(tags)?;

    for tag in &tags {
        library.tags().add_tag(&reference, tag)?;
    }
    if !quiet {
        println!("Tagged {} with: {}", reference, tags.join(", "));
    }
    Ok(())
}

/// Execute the untag command - remove tags from a reference
///
/// # Errors
/// Returns an error if no tags are given or store operations fail
pub fn untag<S: KeyValueStore>(library: &Library<S>, reference: &str, tags: &[String], quiet: bool) -> Result<()> {
    let reference = parse_reference(reference)?;
    let tags = clean_tags(tags)?;

    let mut removed = Vec::new();
    for tag in tags {
        if library.tags().remove_tag(&reference, tag)? {
            removed.push(tag);
        }
    }
    if !quiet {
        if removed.is_empty() {
            println!("{reference} carried none of those tags");
        } else {
            println!("Removed tags {} from {}", removed.join(", "), reference);
        }
    }
    Ok(())
}
