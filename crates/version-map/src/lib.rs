use std::collections::{hash_map::Entry, HashMap};

/// A single `(package id, version)` pair taken from a project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePin {
    pub id: String,
    pub version: String,
}

/// Result of merging one pin into a [`PackageVersionMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First time this package id was seen.
    Inserted,
    /// Already present, the incoming version sorted below the stored one and
    /// replaced it.
    Lowered,
    /// Already present with an equal or smaller stored version, left alone.
    Kept,
}

/// Package versions accumulated across every project file of a conversion run.
///
/// Lookup is case-insensitive; the display casing of an id is whichever
/// variant was inserted first. The caller creates one map per run and threads
/// it through the conversion pipeline, there is no hidden shared state.
#[derive(Debug, Default)]
pub struct PackageVersionMap {
    /// Keyed by the lowercased package id.
    entries: HashMap<String, PackagePin>,
}

impl PackageVersionMap {
    pub fn new() -> Self {
        PackageVersionMap::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record `version` for `id` unless an equal or smaller version is
    /// already recorded.
    ///
    /// Versions are compared as plain strings, byte-wise and case-sensitive,
    /// not as semantic versions: `"10.0.0"` sorts below `"9.0.0"` and
    /// therefore wins. Whichever version string sorts smallest across the
    /// whole run ends up in the manifest.
    pub fn merge(&mut self, id: &str, version: &str) -> MergeOutcome {
        match self.entries.entry(id.to_lowercase()) {
            Entry::Occupied(mut occupied) => {
                if version >= occupied.get().version.as_str() {
                    MergeOutcome::Kept
                } else {
                    occupied.get_mut().version = version.to_string();
                    MergeOutcome::Lowered
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(PackagePin { id: id.to_string(), version: version.to_string() });
                MergeOutcome::Inserted
            }
        }
    }

    /// Version currently recorded for `id`, looked up case-insensitively.
    pub fn version_of(&self, id: &str) -> Option<&str> {
        self.entries.get(&id.to_lowercase()).map(|pin| pin.version.as_str())
    }

    /// All pins sorted ascending by display id under ordinal comparison,
    /// so uppercase ids sort before lowercase ones.
    pub fn sorted_pins(&self) -> Vec<&PackagePin> {
        let mut pins: Vec<_> = self.entries.values().collect();
        pins.sort_by(|a, b| a.id.cmp(&b.id));
        pins
    }
}
