//! Settings command - slideshow preferences

use crate::cli::{SettingsCommands, split_setting};
use crate::settings::{LabelTable, TooWideImagesRule};
use crate::store::{KeyValueStore, keys};
use crate::{Library, Ordering, SlideError, output};
use colored::Colorize;

type Result<T> = std::result::Result<T, SlideError>;

fn ordering_labels() -> LabelTable<Ordering> {
    LabelTable::new([
        (Ordering::Selection, "In selection order"),
        (Ordering::Random, "Shuffled"),
    ])
}

fn rule_labels() -> LabelTable<TooWideImagesRule> {
    LabelTable::new([
        (TooWideImagesRule::ScrollForward, "Scroll forward"),
        (TooWideImagesRule::ScrollBackward, "Scroll backward"),
        (TooWideImagesRule::ScaleDown, "Scale down to fit"),
        (TooWideImagesRule::ScaleUp, "Scale up to fill"),
    ])
}

/// Execute the settings command
///
/// # Errors
/// Returns an error for an unknown key or malformed value, or if store operations fail
pub fn execute<S: KeyValueStore>(library: &Library<S>, command: &SettingsCommands, quiet: bool) -> Result<()> {
    match command {
        SettingsCommands::Show => show(library),
        SettingsCommands::Set { setting } => {
            let (key, value) = split_setting(setting).ok_or_else(|| {
                SlideError::InvalidInput("Invalid format. Use: slidetags settings set key=value".into())
            })?;
            apply(library, key, value)?;
            if !quiet {
                println!("Set {key} = {value}");
            }
            Ok(())
        }
    }
}

/// Write one setting by its store key
///
/// # Errors
/// Returns `InvalidInput` for an unknown key or a value of the wrong shape
pub fn apply<S: KeyValueStore>(library: &Library<S>, key: &str, value: &str) -> Result<()> {
    let settings = library.settings();
    match key {
        keys::ORDERING => {
            let ordering = Ordering::parse(value).ok_or_else(|| invalid(key, value))?;
            settings.set_ordering(ordering)?;
        }
        keys::TOO_WIDE_IMAGES_RULE => {
            let rule = TooWideImagesRule::parse(value).ok_or_else(|| invalid(key, value))?;
            settings.set_too_wide_images_rule(rule)?;
        }
        keys::SECONDS_BETWEEN => settings.set_seconds_between(parse_positive(key, value)?)?,
        keys::TRANSITION_DURATION => settings.set_transition_duration(parse_positive(key, value)?)?,
        keys::ANTI_ALIAS => settings.set_anti_alias(parse_bool(key, value)?)?,
        keys::ANTI_ALIAS_WHILE_SCROLLING => settings.set_anti_alias_while_scrolling(parse_bool(key, value)?)?,
        keys::SWIPE => settings.set_swipe_to_change(parse_bool(key, value)?)?,
        keys::MUTE_VIDEOS => settings.set_mute_videos(parse_bool(key, value)?)?,
        keys::LAST_INDEX => {
            let index = value.parse().map_err(|_| invalid(key, value))?;
            library.references().set_current_index(index)?;
        }
        _ => return Err(SlideError::InvalidInput(format!("Unknown setting: {key}"))),
    }
    Ok(())
}

fn invalid(key: &str, value: &str) -> SlideError {
    SlideError::InvalidInput(format!("Invalid value for {key}: {value}"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value.parse().map_err(|_| invalid(key, value))
}

fn parse_positive(key: &str, value: &str) -> Result<i32> {
    match value.parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(key, value)),
    }
}

fn show<S: KeyValueStore>(library: &Library<S>) -> Result<()> {
    let settings = library.settings();
    let ordering = settings.ordering()?;
    let rule = settings.too_wide_images_rule()?;

    println!("{}", "Slideshow settings".bold());
    println!(
        "{}",
        output::setting(
            keys::ORDERING,
            format!("{ordering} ({})", ordering_labels().label(&ordering).unwrap_or("?"))
        )
    );
    println!("{}", output::setting(keys::SECONDS_BETWEEN, settings.seconds_between()?));
    println!("{}", output::setting(keys::TRANSITION_DURATION, settings.transition_duration()?));
    println!(
        "{}",
        output::setting(
            keys::TOO_WIDE_IMAGES_RULE,
            format!("{rule} ({})", rule_labels().label(&rule).unwrap_or("?"))
        )
    );
    println!("{}", output::setting(keys::ANTI_ALIAS, settings.anti_alias()?));
    println!(
        "{}",
        output::setting(keys::ANTI_ALIAS_WHILE_SCROLLING, settings.anti_alias_while_scrolling()?)
    );
    println!("{}", output::setting(keys::SWIPE, settings.swipe_to_change()?));
    println!("{}", output::setting(keys::MUTE_VIDEOS, settings.mute_videos()?));
    println!("{}", output::setting(keys::LAST_INDEX, library.current_index()?));
    Ok(())
}
