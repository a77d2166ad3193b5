//! Snapshot export and import
//!
//! Export walks the reference list and records, for each tagged reference, its
//! display name and tags. Import merges a snapshot back non-destructively:
//! catalog entries and tag assignments are added, never removed, while the
//! filter state (active/hidden tags, mode, auto-tag flag) is overwritten.
//!
//! Each incoming mapping key is resolved to current references by trying, in
//! order:
//!
//! 1. the display names of the current references (names may collide, in which
//!    case every reference sharing the name receives the tags)
//! 2. exact equality with a current reference's full textual form
//! 3. for keys that look like URIs, the filename extracted from the key's last
//!    path segment, looked up again among the display names
//!
//! Keys matching nothing are skipped silently and only counted in the report.

use crate::reference::{Reference, percent_decode};
use crate::references::ReferenceStore;
use crate::snapshot::TagSnapshot;
use crate::store::{KeyValueStore, StoreError};
use crate::tags::{RESERVED_TAGS, TagStore};
use log::{debug, info};
use std::collections::{BTreeMap, HashMap};

/// Resolves a human-readable display name for a reference
///
/// Supplied by the host (a media provider lookup, for instance). Any closure
/// `Fn(&Reference) -> Option<String>` is a resolver.
pub trait NameResolver {
    fn resolve_display_name(&self, reference: &Reference) -> Option<String>;
}

impl<F> NameResolver for F
where
    F: Fn(&Reference) -> Option<String>,
{
    fn resolve_display_name(&self, reference: &Reference) -> Option<String> {
        self(reference)
    }
}

/// Resolver without a name source; every display name is the last path segment
#[derive(Debug, Clone, Copy, Default)]
pub struct LastSegmentResolver;

impl NameResolver for LastSegmentResolver {
    fn resolve_display_name(&self, _reference: &Reference) -> Option<String> {
        None
    }
}

/// Display name of `reference`, falling back to its last path segment when
/// the resolver has nothing
pub fn display_name<R: NameResolver + ?Sized>(resolver: &R, reference: &Reference) -> Option<String> {
    resolver
        .resolve_display_name(reference)
        .filter(|name| !name.is_empty())
        .or_else(|| reference.last_path_segment())
}

/// How an incoming mapping key was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    DisplayName,
    Identifier,
    UriFilename,
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Mapping keys resolved to at least one reference
    pub matched: usize,
    /// Mapping keys that matched nothing
    pub unmatched: Vec<String>,
    /// Individual (reference, tag) assignments applied
    pub tags_applied: usize,
}

/// Build a snapshot of the current tag state
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be read.
pub fn export<S, R>(
    references: &ReferenceStore<S>,
    tags: &TagStore<S>,
    resolver: &R,
) -> Result<TagSnapshot, StoreError>
where
    S: KeyValueStore,
    R: NameResolver + ?Sized,
{
    let mut mappings: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (reference, assigned) in tags.assignments(&references.list()?)? {
        match display_name(resolver, &reference) {
            Some(name) => {
                mappings.insert(name, assigned.into_iter().collect());
            }
            None => debug!("no display name for {reference}, not exported"),
        }
    }

    let snapshot = TagSnapshot {
        catalog: Some(tags.catalog()?),
        mappings: Some(mappings),
        active_tags: Some(tags.active_tags()?),
        hidden_tags: Some(tags.hidden_tags()?),
        tag_filter_mode: Some(tags.filter_mode()?.as_value().to_string()),
        auto_tag_enabled: tags.auto_tag_enabled()?,
    };
    info!(
        "exported {} tag mapping(s)",
        snapshot.mappings.as_ref().map_or(0, BTreeMap::len)
    );
    Ok(snapshot)
}

/// Merge `snapshot` into the current tag state
///
/// # Errors
///
/// Returns `StoreError` if the store cannot be read or written. Unresolvable
/// mapping keys are not errors.
pub fn import<S, R>(
    snapshot: &TagSnapshot,
    references: &ReferenceStore<S>,
    tags: &TagStore<S>,
    resolver: &R,
) -> Result<ImportReport, StoreError>
where
    S: KeyValueStore,
    R: NameResolver + ?Sized,
{
    let mut report = ImportReport::default();

    if let Some(catalog) = &snapshot.catalog {
        for tag in catalog.iter().filter(|t| !RESERVED_TAGS.contains(&t.as_str())) {
            tags.add_to_catalog(tag)?;
        }
    }

    let current = references.list()?;
    let by_name = names_to_references(&current, resolver);

    if let Some(mappings) = &snapshot.mappings {
        for (key, incoming) in mappings {
            let Some((strategy, targets)) = resolve_targets(key, &by_name, &current) else {
                debug!("no reference matches '{key}', skipped");
                report.unmatched.push(key.clone());
                continue;
            };
            debug!("'{key}' matched {} reference(s) by {strategy:?}", targets.len());
            report.matched += 1;
            for target in &targets {
                for tag in incoming {
                    tags.add_tag(target, tag)?;
                    report.tags_applied += 1;
                }
            }
        }
    }

    if let Some(active) = &snapshot.active_tags {
        tags.set_active_tags(active.clone())?;
    }
    if let Some(hidden) = &snapshot.hidden_tags {
        tags.set_hidden_tags(hidden.clone())?;
    }
    if let Some(mode) = snapshot.filter_mode() {
        tags.set_filter_mode(mode)?;
    }
    tags.set_auto_tag_enabled(snapshot.auto_tag_enabled)?;

    info!(
        "imported {} mapping(s), {} unmatched, {} tag assignment(s)",
        report.matched,
        report.unmatched.len(),
        report.tags_applied
    );
    Ok(report)
}

fn names_to_references<R: NameResolver + ?Sized>(
    references: &[Reference],
    resolver: &R,
) -> HashMap<String, Vec<Reference>> {
    let mut by_name: HashMap<String, Vec<Reference>> = HashMap::new();
    for reference in references {
        if let Some(name) = display_name(resolver, reference) {
            by_name.entry(name).or_default().push(reference.clone());
        }
    }
    by_name
}

fn resolve_targets(
    key: &str,
    by_name: &HashMap<String, Vec<Reference>>,
    current: &[Reference],
) -> Option<(MatchStrategy, Vec<Reference>)> {
    if let Some(targets) = by_name.get(key) {
        return Some((MatchStrategy::DisplayName, targets.clone()));
    }

    if let Some(exact) = current.iter().find(|r| r.as_str() == key) {
        return Some((MatchStrategy::Identifier, vec![exact.clone()]));
    }

    if key.contains("://") {
        let filename = filename_from_uri(key)?;
        return by_name
            .get(&filename)
            .map(|targets| (MatchStrategy::UriFilename, targets.clone()));
    }

    None
}

/// Filename carried by a URI-shaped mapping key
///
/// Escaped keys are decoded as a whole first, so an encoded document id such as
/// `primary%3APictures%2Fa.jpg` yields `a.jpg`.
fn filename_from_uri(key: &str) -> Option<String> {
    if key.contains('%')
        && let Some((_, name)) = percent_decode(key).rsplit_once('/')
    {
        return Some(name.to_string());
    }
    Reference::new(key).last_path_segment()
}
