//! Filter command - active/hidden tags, filter mode and auto-tag flag

use crate::cli::FilterCommands;
use crate::store::KeyValueStore;
use crate::tags::TagSet;
use crate::{FilterMode, Library, SlideError, output};
use colored::Colorize;

type Result<T> = std::result::Result<T, SlideError>;

/// Execute the filter command
///
/// # Errors
/// Returns an error if store operations fail
pub fn execute<S: KeyValueStore>(library: &Library<S>, command: &FilterCommands, quiet: bool) -> Result<()> {
    let tags = library.tags();
    match command {
        FilterCommands::Show => return show(library, quiet),
        FilterCommands::Active { tags: active } => tags.set_active_tags(to_tag_set(active))?,
        FilterCommands::Hidden { tags: hidden } => tags.set_hidden_tags(to_tag_set(hidden))?,
        FilterCommands::Mode { mode } => tags.set_filter_mode(FilterMode::from(*mode))?,
        FilterCommands::AutoTag { enabled } => tags.set_auto_tag_enabled(*enabled)?,
    }
    if !quiet {
        println!(
            "Filter updated: {} of {} reference(s) visible",
            library.filtered_count()?,
            library.references().count()?
        );
    }
    Ok(())
}

fn to_tag_set(tags: &[String]) -> TagSet {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn show<S: KeyValueStore>(library: &Library<S>, quiet: bool) -> Result<()> {
    let tags = library.tags();
    if quiet {
        println!("{}", library.filtered_count()?);
        return Ok(());
    }
    println!("{}", "Tag filter".bold());
    println!("{}", output::setting("mode", tags.filter_mode()?));
    println!("{}", output::setting("active", output::tag_list(&tags.active_tags()?)));
    println!("{}", output::setting("hidden", output::tag_list(&tags.hidden_tags()?)));
    println!("{}", output::setting("auto-tag", tags.auto_tag_enabled()?));
    println!(
        "{}",
        output::setting(
            "visible",
            format!("{} of {}", library.filtered_count()?, library.references().count()?)
        )
    );
    Ok(())
}
