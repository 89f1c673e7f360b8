// src/store/bucket.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Suffix appended to a resolved bucket directory to form its document name.
///
/// The suffix keeps bucket documents visually distinct from source files, and
/// also avoids name collisions between a directory's own bucket document and
/// the subdirectory of the same name holding its children's documents
/// (`<cache_root>/a.bucket.json` vs `<cache_root>/a/b.bucket.json`).
pub const BUCKET_SUFFIX: &str = ".bucket.json";

/// One recorded observation of a tracked file's content.
///
/// `hash` is a pure function of the file's byte content at the moment it was
/// recorded; it carries no information about file identity or path. The zero
/// entry (`Default`) means "never observed" and is a valid, non-error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Observed modification time, in milliseconds since the Unix epoch.
    pub date_updated: i64,
    /// Weak 32-bit content fingerprint (see [`crate::fingerprint`]).
    pub hash: i32,
}

/// One persisted bucket: entries for every tracked file resolving to the same
/// directory-derived key.
///
/// The bucket is the unit of persistence; any single committed change rewrites
/// the whole document. Keys are ordered (`BTreeMap`) so the serialized JSON is
/// stable and line-diffable in version control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bucket {
    entries: BTreeMap<String, CacheEntry>,
}

impl Bucket {
    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Entry for `key`, or the zero "never observed" entry when absent.
    pub fn entry_or_default(&self, key: &str) -> CacheEntry {
        self.entries.get(key).copied().unwrap_or_default()
    }

    pub fn insert(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CacheEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
