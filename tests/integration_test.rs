//! Integration tests for slidetags
//!
//! These tests drive the library against real sled stores in temporary
//! directories and check complete workflows: persistence across reopen,
//! filtering, ordering and snapshot exchange between two stores.

use slidetags::reconcile::LastSegmentResolver;
use slidetags::snapshot::TagSnapshot;
use slidetags::store::SledStore;
use slidetags::tags::{IMAGES_TAG, VIDEOS_TAG};
use slidetags::{FilterMode, Library, Ordering, Reference, TagSet};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn set(tags: &[&str]) -> TagSet {
    tags.iter().map(|t| (*t).to_string()).collect()
}

fn refs(values: &[&str]) -> Vec<Reference> {
    values.iter().map(|v| Reference::from(*v)).collect()
}

fn open(dir: &TempDir, name: &str) -> Library<SledStore> {
    Library::open(dir.path().join(name)).unwrap()
}

/// Add each reference with its comma-separated tags (`""` for none)
fn seed(library: &Library<SledStore>, entries: &[(&str, &str)]) {
    for (reference, tags) in entries {
        let reference = Reference::from(*reference);
        library.references().add(reference.clone()).unwrap();
        for tag in tags.split(',').filter(|t| !t.is_empty()) {
            library.tags().add_tag(&reference, tag).unwrap();
        }
    }
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let library = open(&dir, "store");
        seed(
            &library,
            &[("content://m/1", "beach"), ("content://m/2", "city,night")],
        );
        library.tags().set_active_tags(set(&["night"])).unwrap();
        library.tags().set_filter_mode(FilterMode::And).unwrap();
        library.settings().set_ordering(Ordering::Random).unwrap();
        library.references().set_current_index(7).unwrap();
    }

    let library = open(&dir, "store");
    assert_eq!(library.references().list().unwrap(), refs(&["content://m/1", "content://m/2"]));
    assert_eq!(library.tags().tags_of(&Reference::from("content://m/2")).unwrap(), set(&["city", "night"]));
    assert_eq!(library.tags().filter_mode().unwrap(), FilterMode::And);
    assert_eq!(library.settings().ordering().unwrap(), Ordering::Random);
    assert_eq!(library.filtered_references().unwrap(), refs(&["content://m/2"]));
    assert_eq!(library.references().current_index().unwrap(), 1);
    assert_eq!(library.current_index().unwrap(), 0);
}

#[test]
fn test_deduplication_by_last_segment() {
    let dir = tempfile::tempdir().unwrap();
    let library = open(&dir, "store");

    assert!(library.references().add(Reference::from("file:///sdcard/DCIM/a.jpg")).unwrap());
    assert!(!library.references().add(Reference::from("content://media/picker/a.jpg")).unwrap());
    assert!(library.references().add(Reference::from("file:///sdcard/DCIM/b.jpg")).unwrap());

    assert_eq!(library.references().count().unwrap(), 2);
}

#[test]
fn test_filter_modes_against_sled_store() {
    let dir = tempfile::tempdir().unwrap();
    let library = open(&dir, "store");
    seed(
        &library,
        &[
            ("r/1", "A,B"),
            ("r/2", "A"),
            ("r/3", "B"),
            ("r/4", ""),
        ],
    );
    library.tags().set_active_tags(set(&["A", "B"])).unwrap();

    let expected = [
        (FilterMode::And, vec!["r/1"]),
        (FilterMode::Or, vec!["r/1", "r/2", "r/3"]),
        (FilterMode::Xand, vec!["r/2", "r/3", "r/4"]),
        (FilterMode::Xor, vec!["r/2", "r/3"]),
    ];
    for (mode, visible) in expected {
        library.tags().set_filter_mode(mode).unwrap();
        assert_eq!(library.filtered_references().unwrap(), refs(&visible), "mode {mode}");
    }

    library.tags().set_active_tags(TagSet::new()).unwrap();
    library.tags().set_hidden_tags(set(&["B"])).unwrap();
    assert_eq!(library.filtered_references().unwrap(), refs(&["r/2", "r/4"]));
}

#[test]
fn test_random_display_keeps_membership() {
    let dir = tempfile::tempdir().unwrap();
    let library = open(&dir, "store");
    let all: Vec<String> = (0..20).map(|i| format!("content://m/{i}")).collect();
    library.references().add_all(all.iter().map(|r| Reference::from(r.as_str()))).unwrap();
    library.settings().set_ordering(Ordering::Random).unwrap();

    let mut shown = library.display_list().unwrap();
    assert_eq!(shown.len(), 20);
    shown.sort();
    let mut expected = library.filtered_references().unwrap();
    expected.sort();
    assert_eq!(shown, expected);
}

#[test]
fn test_export_import_between_devices() {
    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("tags.json");

    {
        let phone = open(&dir, "phone");
        seed(
            &phone,
            &[
                ("content://media/external/images/media/IMG_1.jpg", "trip,2023"),
                ("file:///sdcard/Pictures/sunset.png", "sky"),
                ("content://media/external/images/media/untagged.jpg", ""),
            ],
        );
        phone.tags().set_hidden_tags(set(&["private"])).unwrap();
        phone.tags().set_filter_mode(FilterMode::Xor).unwrap();
        phone.tags().set_auto_tag_enabled(true).unwrap();
        phone.export_to_file(&LastSegmentResolver, &backup).unwrap();
    }

    let tablet = open(&dir, "tablet");
    seed(
        &tablet,
        &[
            ("file:///storage/emulated/0/DCIM/IMG_1.jpg", "existing"),
            ("content://other/provider/sunset.png", ""),
            ("file:///storage/emulated/0/DCIM/new.jpg", ""),
        ],
    );
    let report = tablet.import_from_file(&LastSegmentResolver, &backup).unwrap();

    assert_eq!(report.matched, 2);
    assert!(report.unmatched.is_empty());
    assert_eq!(report.tags_applied, 3);

    let assignments = tablet.assignments().unwrap();
    assert_eq!(
        assignments[&Reference::from("file:///storage/emulated/0/DCIM/IMG_1.jpg")],
        set(&["2023", "existing", "trip"])
    );
    assert_eq!(assignments[&Reference::from("content://other/provider/sunset.png")], set(&["sky"]));
    assert!(!assignments.contains_key(&Reference::from("file:///storage/emulated/0/DCIM/new.jpg")));

    let catalog = tablet.tags().catalog().unwrap();
    assert!(catalog.is_superset(&set(&["trip", "2023", "sky", "existing", IMAGES_TAG, VIDEOS_TAG])));
    assert_eq!(tablet.tags().hidden_tags().unwrap(), set(&["private"]));
    assert_eq!(tablet.tags().filter_mode().unwrap(), FilterMode::Xor);
    assert!(tablet.tags().auto_tag_enabled().unwrap());
}

#[test]
fn test_snapshot_file_format() {
    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("tags.json");
    let library = open(&dir, "store");
    seed(&library, &[("file:///p/a.jpg", "x")]);
    library.tags().set_filter_mode(FilterMode::And).unwrap();

    library.export_to_file(&LastSegmentResolver, &backup).unwrap();
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&backup).unwrap()).unwrap();

    assert_eq!(json["tagFilterMode"], "and");
    assert_eq!(json["autoTagEnabled"], false);
    assert_eq!(json["mappings"]["a.jpg"], serde_json::json!(["x"]));
    assert!(json["activeTags"].as_array().unwrap().is_empty());
    assert!(json["catalog"].as_array().unwrap().iter().any(|t| *t == IMAGES_TAG));
}

#[test]
fn test_import_partial_snapshot_leaves_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("partial.json");
    std::fs::write(&backup, r#"{ "mappings": { "a.jpg": ["x"] } }"#).unwrap();

    let library = open(&dir, "store");
    seed(&library, &[("file:///p/a.jpg", "")]);
    library.tags().set_active_tags(set(&["keep"])).unwrap();
    library.tags().set_filter_mode(FilterMode::And).unwrap();

    library.import_from_file(&LastSegmentResolver, &backup).unwrap();

    assert_eq!(library.tags().active_tags().unwrap(), set(&["keep"]));
    assert_eq!(library.tags().filter_mode().unwrap(), FilterMode::And);
    assert_eq!(library.tags().tags_of(&Reference::from("file:///p/a.jpg")).unwrap(), set(&["x"]));
}

#[test]
fn test_import_rejects_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("broken.json");
    std::fs::write(&backup, "{ not json").unwrap();

    let library = open(&dir, "store");
    assert!(library.import_from_file(&LastSegmentResolver, &backup).is_err());
    assert!(TagSnapshot::read_from(Path::new(&backup)).is_err());
}

#[test]
fn test_concurrent_adds_keep_every_reference() {
    let dir = tempfile::tempdir().unwrap();
    let library = Arc::new(open(&dir, "store"));

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let library = Arc::clone(&library);
            scope.spawn(move || {
                for i in 0..25 {
                    let reference = Reference::from(format!("content://m/{worker}-{i}"));
                    library.references().add(reference).unwrap();
                }
            });
        }
    });

    assert_eq!(library.references().count().unwrap(), 100);
}

#[test]
fn test_rename_cascades_to_filters_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    {
        let library = open(&dir, "store");
        seed(&library, &[("content://m/1", "old"), ("content://m/2", "old,k")]);
        library.tags().set_active_tags(set(&["old"])).unwrap();
        library.tags().set_hidden_tags(set(&["old", "k"])).unwrap();
        library.rename_tag("old", "new").unwrap();
    }

    let library = open(&dir, "store");
    assert_eq!(library.tags().active_tags().unwrap(), set(&["new"]));
    assert_eq!(library.tags().hidden_tags().unwrap(), set(&["k", "new"]));
    let catalog = library.tags().catalog().unwrap();
    assert!(catalog.contains("new") && !catalog.contains("old"));
    assert!(library.assignments().unwrap().values().all(|t| t.contains("new")));
}
