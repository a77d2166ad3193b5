//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for slidetags using the `clap` crate.
//!
//! # Commands
//!
//! - **show**: Print the visible references in display order (default)
//! - **add** / **remove** / **replace** / **list**: Maintain the reference list
//! - **tag** / **untag**: Attach or detach tags on one reference
//! - **autotag**: Tag references whose names contain catalog tags
//! - **tags**: Manage the tag catalog (list, add, remove, rename)
//! - **filter**: Inspect or change the active/hidden tags and the filter mode
//! - **settings**: Inspect or change slideshow preferences
//! - **export** / **import**: Move tag state through a JSON snapshot
//! - **config**: Manage the application configuration

use crate::filter::FilterMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Filter mode as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Reference carries every active tag
    And,
    /// Reference carries at least one active tag
    Or,
    /// Reference is missing at least one active tag
    Xand,
    /// Reference carries exactly one active tag
    Xor,
}

impl From<ModeArg> for FilterMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::And => Self::And,
            ModeArg::Or => Self::Or,
            ModeArg::Xand => Self::Xand,
            ModeArg::Xor => Self::Xor,
        }
    }
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "slidetags")]
#[command(about = "A tag-filtered media list for slideshows", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Store location to use (overrides config)
    #[arg(long = "store", value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the visible references in display order (default)
    #[command(visible_alias = "s")]
    Show {
        /// Print references without their tags
        #[arg(long = "plain")]
        plain: bool,
    },

    /// Append references to the list
    Add {
        /// References (URIs or paths) to add
        #[arg(value_name = "REFERENCE", required = true)]
        references: Vec<String>,
    },

    /// Remove references from the list
    #[command(visible_alias = "rm")]
    Remove {
        /// References to remove
        #[arg(value_name = "REFERENCE", required = true)]
        references: Vec<String>,
    },

    /// Replace one reference with another, keeping its position
    Replace {
        /// Reference currently in the list
        old: String,

        /// Reference to put in its place
        new: String,
    },

    /// List every reference in list order, ignoring filters
    #[command(visible_alias = "ls")]
    List,

    /// Add tags to a reference
    #[command(visible_alias = "t")]
    Tag {
        /// Reference to tag
        reference: String,

        /// Tags to add
        #[arg(value_name = "TAG", required = true)]
        tags: Vec<String>,
    },

    /// Remove tags from a reference
    Untag {
        /// Reference to untag
        reference: String,

        /// Tags to remove
        #[arg(value_name = "TAG", required = true)]
        tags: Vec<String>,
    },

    /// Tag references with catalog tags found in their names
    Autotag {
        /// References to process (the whole list if none given)
        #[arg(value_name = "REFERENCE")]
        references: Vec<String>,

        /// Only check this catalog tag
        #[arg(long = "tag", value_name = "TAG")]
        tag: Option<String>,
    },

    /// Manage the tag catalog
    Tags {
        #[command(subcommand)]
        command: TagsCommands,
    },

    /// Inspect or change the tag filter
    #[command(visible_alias = "f")]
    Filter {
        #[command(subcommand)]
        command: FilterCommands,
    },

    /// Inspect or change slideshow preferences
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },

    /// Export tag state to a JSON snapshot
    Export {
        /// Output file path (prints to stdout if not specified)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Import tag state from a JSON snapshot
    Import {
        /// Path to the snapshot file
        path: PathBuf,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Tag catalog subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TagsCommands {
    /// List catalog tags with usage counts
    #[command(visible_alias = "ls")]
    List,

    /// Add a tag to the catalog without assigning it
    Add {
        /// Tag to add
        tag: String,
    },

    /// Remove a tag from the catalog and from every reference
    #[command(visible_alias = "rm")]
    Remove {
        /// Tag to remove
        tag: String,
    },

    /// Rename a tag everywhere
    #[command(visible_alias = "mv")]
    Rename {
        /// Current tag name
        old: String,

        /// New tag name
        new: String,
    },
}

/// Filter subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FilterCommands {
    /// Show the current filter state and the visible count
    Show,

    /// Replace the active tag set (no tags clears it)
    Active {
        #[arg(value_name = "TAG")]
        tags: Vec<String>,
    },

    /// Replace the hidden tag set (no tags clears it)
    Hidden {
        #[arg(value_name = "TAG")]
        tags: Vec<String>,
    },

    /// Set how active tags are combined
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },

    /// Enable or disable automatic tagging
    AutoTag {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::value_parser!(bool))]
        enabled: bool,
    },
}

/// Slideshow settings subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommands {
    /// Show every setting
    Show,

    /// Set a value
    Set {
        /// Setting key=value (e.g., seconds=20)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., quiet=true)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., `store_path`)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Show if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Show { plain: false })
    }
}

/// Split a `key=value` argument
///
/// Returns `None` when there is no `=` or the key is empty.
#[must_use]
pub fn split_setting(setting: &str) -> Option<(&str, &str)> {
    let (key, value) = setting.split_once('=')?;
    let key = key.trim();
    (!key.is_empty()).then_some((key, value.trim()))
}
