// src/track/writer.rs

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::fsio;
use crate::store::{CacheEntry, CacheStore};

/// Commits the current state of tracked files into a shared [`CacheStore`].
///
/// This is the only component that creates or updates cache entries; nothing
/// in this crate ever deletes one.
pub struct CacheWriter {
    store: Arc<CacheStore>,
}

impl CacheWriter {
    pub fn new(store: Arc<CacheStore>) -> Self {
        Self { store }
    }

    /// Re-read a tracked file and commit its current fingerprint.
    ///
    /// Returns the committed entry, which may be field-identical to the
    /// previously stored one when the commit was a no-op. Side effect: at most
    /// one bucket-document write.
    pub async fn record(&self, path: &Path) -> Result<CacheEntry> {
        let (date_updated, data) =
            tokio::try_join!(fsio::modified_ms(path), fsio::read_to_string(path))?;

        debug!(file = ?path, date_updated, "recording current file state");
        self.store.commit(path, date_updated, &data).await
    }
}
