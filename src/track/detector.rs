// src/track/detector.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::fingerprint::fingerprint;
use crate::fsio;
use crate::store::{CacheEntry, CacheStore};

/// Timestamp-delta threshold beyond which a matching fingerprint is no longer
/// trusted as proof of "unchanged".
///
/// The fingerprint is intentionally weak, so an equal hash cannot by itself
/// certify that content is identical. When the observed modification time has
/// advanced past this window since the entry was recorded, the file is
/// reported as changed even if the hashes match. False positives here (e.g.
/// touch without modify, clock skew between machines) are the accepted price
/// for never missing a real change behind a hash collision.
pub const GRACE_PERIOD_MS: i64 = 120_000;

/// Result of one change-detection query. Transient, never persisted.
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    /// The file's full content, as read for this query.
    pub data: String,
    /// Observed modification time, in milliseconds since the Unix epoch.
    pub date_updated: i64,
    pub changed: bool,
}

/// The pure detection policy: does the current observation differ from the
/// stored record?
///
/// `changed` when the fingerprints differ, or when the modification time has
/// advanced by more than [`GRACE_PERIOD_MS`] since the record was committed.
pub fn entry_changed(current: &CacheEntry, stored: &CacheEntry) -> bool {
    current.hash != stored.hash
        || (current.date_updated - stored.date_updated) > GRACE_PERIOD_MS
}

/// Read-only change-detection query against a shared [`CacheStore`].
pub struct ChangeDetector {
    store: Arc<CacheStore>,
}

impl ChangeDetector {
    pub fn new(store: Arc<CacheStore>) -> Self {
        Self { store }
    }

    /// Report whether a tracked file changed since its last committed record.
    ///
    /// Stats and reads the file concurrently (there is no ordering dependency
    /// between the two), then applies [`entry_changed`] against the stored
    /// entry. Never mutates the cache; failing to read or stat the file is
    /// fatal for this call.
    pub async fn check(&self, path: &Path) -> Result<FileInfo> {
        let (date_updated, data) =
            tokio::try_join!(fsio::modified_ms(path), fsio::read_to_string(path))?;

        let stored = self.store.read_entry(path).await?;
        let current = CacheEntry {
            date_updated,
            hash: fingerprint(&data),
        };
        let changed = entry_changed(&current, &stored);

        debug!(
            file = ?path,
            hash = current.hash,
            stored_hash = stored.hash,
            delta_ms = current.date_updated - stored.date_updated,
            changed,
            "change detection"
        );

        Ok(FileInfo {
            path: path.to_path_buf(),
            data,
            date_updated,
            changed,
        })
    }
}
