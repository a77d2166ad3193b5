//! Portable tag snapshot
//!
//! A [`TagSnapshot`] carries the tag state of one device or session so it can be
//! merged into another. Per-reference tags are keyed by *display name* rather
//! than by the raw reference, since raw identifiers do not survive a move
//! between devices.
//!
//! Snapshots are stored as pretty-printed JSON with camelCase field names. On
//! read every field is optional: a missing or `null` field means "not present"
//! and is left untouched by an import.

use crate::filter::FilterMode;
use crate::tags::TagSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading or writing a snapshot file
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Snapshot format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exported tag state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSnapshot {
    /// Known tags, reserved tags included
    pub catalog: Option<TagSet>,

    /// Display name -> tags of the reference(s) carrying that name
    pub mappings: Option<BTreeMap<String, Vec<String>>>,

    pub active_tags: Option<TagSet>,

    pub hidden_tags: Option<TagSet>,

    /// Machine value of the filter mode
    pub tag_filter_mode: Option<String>,

    #[serde(default)]
    pub auto_tag_enabled: bool,
}

impl TagSnapshot {
    /// Filter mode carried by the snapshot, if any; unknown values read as `Or`
    #[must_use]
    pub fn filter_mode(&self) -> Option<FilterMode> {
        self.tag_filter_mode.as_deref().map(FilterMode::from_value)
    }

    /// # Errors
    ///
    /// Returns `SnapshotError` if the snapshot cannot be serialized.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// Returns `SnapshotError` if `json` is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot to `path` as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if serialization or the write fails.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a snapshot from `path`
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if the file cannot be read or parsed.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let snapshot = TagSnapshot {
            catalog: Some(["beach".to_string()].into()),
            mappings: Some(BTreeMap::from([("IMG_1.jpg".to_string(), vec!["beach".to_string()])])),
            active_tags: Some(TagSet::new()),
            hidden_tags: None,
            tag_filter_mode: Some("and".to_string()),
            auto_tag_enabled: true,
        };
        let json = snapshot.to_json().unwrap();

        assert!(json.contains("\"activeTags\""));
        assert!(json.contains("\"tagFilterMode\": \"and\""));
        assert!(json.contains("\"autoTagEnabled\": true"));
        assert_eq!(TagSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let snapshot = TagSnapshot::from_json(r#"{"catalog": ["a"], "hiddenTags": null}"#).unwrap();
        assert!(snapshot.mappings.is_none());
        assert!(snapshot.hidden_tags.is_none());
        assert!(snapshot.filter_mode().is_none());
        assert!(!snapshot.auto_tag_enabled);
    }

    #[test]
    fn test_unknown_filter_mode_reads_as_or() {
        let snapshot = TagSnapshot::from_json(r#"{"tagFilterMode": "nor"}"#).unwrap();
        assert_eq!(snapshot.filter_mode(), Some(FilterMode::Or));
    }

    #[test]
    fn test_invalid_json() {
        let err = TagSnapshot::from_json("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.json");
        let snapshot = TagSnapshot {
            auto_tag_enabled: true,
            ..Default::default()
        };

        snapshot.write_to(&path).unwrap();
        assert_eq!(TagSnapshot::read_from(&path).unwrap(), snapshot);
        assert!(matches!(
            TagSnapshot::read_from(dir.path().join("missing.json")),
            Err(SnapshotError::Io(_))
        ));
    }
}
