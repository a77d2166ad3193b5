//! Tags command - catalog management

use crate::cli::TagsCommands;
use crate::store::KeyValueStore;
use crate::tags::is_reserved;
use crate::{Library, SlideError, output};
use std::collections::BTreeMap;

type Result<T> = std::result::Result<T, SlideError>;

/// Execute the tags management command
///
/// # Errors
/// Returns an error if store operations fail or a tag name is empty
pub fn execute<S: KeyValueStore>(library: &Library<S>, command: &TagsCommands, quiet: bool) -> Result<()> {
    match command {
        TagsCommands::List => list_catalog(library, quiet),
        TagsCommands::Add { tag } => add_tag(library, tag, quiet),
        TagsCommands::Remove { tag } => remove_tag(library, tag, quiet),
        TagsCommands::Rename { old, new } => rename_tag(library, old, new, quiet),
    }
}

/// Catalog tags with the number of listed references carrying each
///
/// # Errors
/// Returns an error if store operations fail
pub fn usage_counts<S: KeyValueStore>(library: &Library<S>) -> Result<BTreeMap<String, usize>> {
    let mut counts: BTreeMap<String, usize> =
        library.tags().catalog()?.into_iter().map(|tag| (tag, 0)).collect();
    for tags in library.assignments()?.into_values() {
        for tag in tags {
            *counts.entry(tag).or_default() += 1;
        }
    }
    Ok(counts)
}

fn list_catalog<S: KeyValueStore>(library: &Library<S>, quiet: bool) -> Result<()> {
    if !quiet {
        println!("Tags in catalog:");
    }
    for (tag, count) in usage_counts(library)? {
        println!("{}", output::tag_with_count(&tag, count, is_reserved(&tag), quiet));
    }
    Ok(())
}

fn add_tag<S: KeyValueStore>(library: &Library<S>, tag: &str, quiet: bool) -> Result<()> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(SlideError::InvalidInput("Tag name is empty".into()));
    }
    let added = library.tags().add_to_catalog(tag)?;
    if !quiet {
        if added {
            println!("Added tag '{tag}' to the catalog");
        } else {
            println!("'{tag}' is already in the catalog");
        }
    }
    Ok(())
}

fn remove_tag<S: KeyValueStore>(library: &Library<S>, tag: &str, quiet: bool) -> Result<()> {
    if is_reserved(tag) {
        if !quiet {
            println!("'{tag}' is reserved and cannot be removed");
        }
        return Ok(());
    }
    library.remove_tag_from_catalog(tag)?;
    if !quiet {
        println!("Removed tag '{tag}' from the catalog and every reference");
    }
    Ok(())
}

fn rename_tag<S: KeyValueStore>(library: &Library<S>, old: &str, new: &str, quiet: bool) -> Result<()> {
    let new = new.trim();
    if new.is_empty() {
        return Err(SlideError::InvalidInput("New tag name is empty".into()));
    }
    if is_reserved(old) {
        if !quiet {
            println!("'{old}' is reserved and cannot be renamed");
        }
        return Ok(());
    }
    library.rename_tag(old, new)?;
    if !quiet {
        println!("Renamed tag '{old}' to '{new}'");
    }
    Ok(())
}
