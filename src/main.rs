//! Slidetags CLI application entry point
//!
//! Command-line host for the slideshow reference list: maintain the list,
//! tag references, tune the tag filter and move tag state between devices.
//!
//! # Usage
//!
//! ```bash
//! # Print the visible references in display order (default command)
//! slidetags
//!
//! # Maintain the list
//! slidetags add file:///sdcard/DCIM/beach.jpg content://media/external/images/42
//! slidetags replace content://media/external/images/42 content://media/external/images/43
//!
//! # Tag and filter
//! slidetags tag file:///sdcard/DCIM/beach.jpg summer sea
//! slidetags tags add sunset
//! slidetags autotag --tag sunset
//! slidetags filter active summer
//! slidetags filter mode and
//! slidetags filter hidden private
//!
//! # Back up tag state and restore it elsewhere
//! slidetags export -o tags.json
//! slidetags import tags.json
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/slidetags/config.toml` on Linux). Set `RUST_LOG` or pass
//! `--verbose` for diagnostic logging.

use log::debug;
use slidetags::{
    Library, SlideError,
    cli::{Cli, Commands, ConfigCommands, split_setting},
    commands, config,
};

type Result<T> = std::result::Result<T, SlideError>;

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn handle_config_command(mut config: config::SlideConfig, command: &ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = split_setting(setting).ok_or_else(|| {
                SlideError::InvalidInput("Invalid format. Use: slidetags config set key=value".into())
            })?;
            config.set(key, value)?;
            config.save()?;
            if !quiet {
                println!("Set {key} = {value}");
            }
        }
        ConfigCommands::Get { key } => {
            let value = config.get(key).ok_or_else(|| {
                SlideError::InvalidInput(format!(
                    "Unknown configuration key: '{key}'. Available keys: store_path, quiet"
                ))
            })?;
            println!("{value}");
        }
    }
    Ok(())
}

/// Main entry point for the slidetags application
///
/// Loads configuration, parses command-line arguments, and dispatches to the
/// appropriate command handler.
///
/// # Errors
///
/// Returns `SlideError` if configuration loading fails, the store cannot be
/// opened, or any command handler returns an error.
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let config = config::SlideConfig::load()?;
    let quiet = cli.quiet || config.quiet;
    let command = cli.get_command();

    if let Commands::Config { command } = &command {
        return handle_config_command(config, command, quiet);
    }

    let store_path = match cli.store {
        Some(path) => path,
        None => config.resolved_store_path()?,
    };
    debug!("opening store at {}", store_path.display());
    let library = Library::open(&store_path)?;

    match &command {
        Commands::Show { plain } => commands::references::show(&library, *plain, quiet)?,
        Commands::Add { references } => commands::references::add(&library, references, quiet)?,
        Commands::Remove { references } => commands::references::remove(&library, references, quiet)?,
        Commands::Replace { old, new } => commands::references::replace(&library, old, new, quiet)?,
        Commands::List => commands::references::list(&library, quiet)?,
        Commands::Tag { reference, tags } => commands::tag(&library, reference, tags, quiet)?,
        Commands::Untag { reference, tags } => commands::untag(&library, reference, tags, quiet)?,
        Commands::Autotag { references, tag } => {
            commands::references::autotag(&library, references, tag.as_deref(), quiet)?;
        }
        Commands::Tags { command } => commands::tags(&library, command, quiet)?,
        Commands::Filter { command } => commands::filter(&library, command, quiet)?,
        Commands::Settings { command } => commands::settings(&library, command, quiet)?,
        Commands::Export { output } => commands::backup::export(&library, output.as_deref(), quiet)?,
        Commands::Import { path } => commands::backup::import(&library, path, quiet)?,
        Commands::Config { .. } => unreachable!(),
    }

    Ok(())
}
