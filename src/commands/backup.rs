//! Export and import of tag snapshots

use crate::reconcile::LastSegmentResolver;
use crate::store::KeyValueStore;
use crate::{Library, SlideError};
use std::path::Path;

type Result<T> = std::result::Result<T, SlideError>;

/// Execute the export command - write to `output`, or print JSON to stdout
///
/// # Errors
/// Returns an error if the store cannot be read or the file cannot be written
pub fn export<S: KeyValueStore>(library: &Library<S>, output: Option<&Path>, quiet: bool) -> Result<()> {
    match output {
        Some(path) => {
            let snapshot = library.export_to_file(&LastSegmentResolver, path)?;
            if !quiet {
                println!(
                    "Exported {} mapping(s) to {}",
                    snapshot.mappings.as_ref().map_or(0, |m| m.len()),
                    path.display()
                );
            }
        }
        None => {
            let snapshot = library.export_snapshot(&LastSegmentResolver)?;
            println!("{}", snapshot.to_json()?);
        }
    }
    Ok(())
}

/// Execute the import command - merge a snapshot file into the current state
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or store operations fail
pub fn import<S: KeyValueStore>(library: &Library<S>, path: &Path, quiet: bool) -> Result<()> {
    let report = library.import_from_file(&LastSegmentResolver, path)?;
    if !quiet {
        println!(
            "Imported {} mapping(s), {} tag assignment(s) applied",
            report.matched, report.tags_applied
        );
        if !report.unmatched.is_empty() {
            println!("Skipped {} unmatched name(s):", report.unmatched.len());
            for name in &report.unmatched {
                println!("  {name}");
            }
        }
    }
    Ok(())
}
