// src/store/store.rs

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use anyhow::Context;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::errors::{FreshcacheError, Result};
use crate::fingerprint::fingerprint;
use crate::fsio;
use crate::store::bucket::{BUCKET_SUFFIX, Bucket, CacheEntry};
use crate::store::path_utils::relative_str;

/// Default cache root, relative to the project root.
pub const DEFAULT_CACHE_DIR: &str = ".freshcache";

/// Snapshot of the store's I/O counters.
///
/// `writes_skipped` counts commits that matched the stored entry field-wise
/// and therefore performed no document write.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreStats {
    pub buckets_loaded: u64,
    pub documents_read: u64,
    pub documents_written: u64,
    pub writes_skipped: u64,
}

/// Directory-partitioned store of [`CacheEntry`] records.
///
/// One instance is constructed per run and passed by handle
/// (`Arc<CacheStore>`) to every consumer; there is no ambient singleton.
///
/// Loaded buckets live in a process-lifetime overlay keyed by document path.
/// The overlay is a write-avoidance optimization, not a source of truth: the
/// document on disk is authoritative. Bucket objects in the overlay are shared
/// (`Arc`) and mutated in place, so every holder of the same bucket observes
/// writes immediately. Each bucket sits behind its own async mutex, which
/// serializes read-modify-write commits against that bucket. Nothing is ever
/// evicted from the overlay.
pub struct CacheStore {
    project_root: PathBuf,
    cache_root: PathBuf,
    overlay: StdMutex<HashMap<PathBuf, Arc<Mutex<Bucket>>>>,
    buckets_loaded: AtomicU64,
    documents_read: AtomicU64,
    documents_written: AtomicU64,
    writes_skipped: AtomicU64,
}

impl CacheStore {
    pub fn new(project_root: impl Into<PathBuf>, cache_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            cache_root: cache_root.into(),
            overlay: StdMutex::new(HashMap::new()),
            buckets_loaded: AtomicU64::new(0),
            documents_read: AtomicU64::new(0),
            documents_written: AtomicU64::new(0),
            writes_skipped: AtomicU64::new(0),
        }
    }

    /// Store rooted at `<project_root>/.freshcache`.
    pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let cache_root = project_root.join(DEFAULT_CACHE_DIR);
        Self::new(project_root, cache_root)
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Load the bucket for a tracked file, reading its document from disk the
    /// first time and returning the shared in-memory bucket afterwards.
    ///
    /// A missing document is not an error: the bucket starts empty and nothing
    /// is written to disk for it until the first commit. Any other read or
    /// parse failure propagates.
    pub async fn load_bucket(&self, file: &Path) -> Result<Arc<Mutex<Bucket>>> {
        let doc_path = self.bucket_doc_path(file)?;

        if let Some(bucket) = self.overlay.lock().unwrap().get(&doc_path) {
            debug!(doc = ?doc_path, "bucket overlay hit");
            return Ok(Arc::clone(bucket));
        }

        let bucket = self.read_bucket_doc(&doc_path).await?;

        // Two tasks may race past the overlay miss and both read the
        // document; whichever inserts first wins and both share its bucket.
        let mut overlay = self.overlay.lock().unwrap();
        let shared = overlay.entry(doc_path).or_insert_with(|| {
            self.buckets_loaded.fetch_add(1, Ordering::Relaxed);
            Arc::new(Mutex::new(bucket))
        });
        Ok(Arc::clone(shared))
    }

    /// Stored entry for a tracked file, or the zero entry when the file has
    /// never been observed.
    pub async fn read_entry(&self, file: &Path) -> Result<CacheEntry> {
        let key = self.entry_key(file)?;
        let bucket = self.load_bucket(file).await?;
        let bucket = bucket.lock().await;
        Ok(bucket.entry_or_default(&key))
    }

    /// Commit the current observation of a tracked file.
    ///
    /// Computes the fingerprint of `content`, and compares the resulting entry
    /// field-wise against the stored one. An equal entry is a no-op: no
    /// mutation, no document write. Otherwise the bucket is mutated in place
    /// and the whole document rewritten.
    ///
    /// The bucket's mutex is held across compare, mutate and write — the
    /// per-bucket single-writer serialization point.
    pub async fn commit(
        &self,
        file: &Path,
        date_updated_ms: i64,
        content: &str,
    ) -> Result<CacheEntry> {
        let key = self.entry_key(file)?;
        let doc_path = self.bucket_doc_path(file)?;
        let next = CacheEntry {
            date_updated: date_updated_ms,
            hash: fingerprint(content),
        };

        let shared = self.load_bucket(file).await?;
        let mut bucket = shared.lock().await;

        if bucket.get(&key) == Some(&next) {
            debug!(file = ?file, "entry unchanged, skipping document write");
            self.writes_skipped.fetch_add(1, Ordering::Relaxed);
            return Ok(next);
        }

        bucket.insert(key, next);
        let raw = serde_json::to_string_pretty(&*bucket)
            .with_context(|| format!("serializing bucket document {:?}", doc_path))?;
        fsio::write(&doc_path, &raw).await?;
        self.documents_written.fetch_add(1, Ordering::Relaxed);
        info!(doc = ?doc_path, entries = bucket.len(), "wrote bucket document");

        Ok(next)
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            buckets_loaded: self.buckets_loaded.load(Ordering::Relaxed),
            documents_read: self.documents_read.load(Ordering::Relaxed),
            documents_written: self.documents_written.load(Ordering::Relaxed),
            writes_skipped: self.writes_skipped.load(Ordering::Relaxed),
        }
    }

    /// Resolve the bucket document path for a tracked file.
    ///
    /// The file's parent directory, taken relative to the project root, is
    /// remapped beneath the cache root with [`BUCKET_SUFFIX`] appended. All
    /// files in one directory share one document; a file directly in the
    /// project root resolves to `<cache_root>/.bucket.json`.
    pub fn bucket_doc_path(&self, file: &Path) -> Result<PathBuf> {
        let rel = self.tracked_rel(file)?;
        let rel_dir = rel.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        Ok(self.cache_root.join(format!("{rel_dir}{BUCKET_SUFFIX}")))
    }

    /// Key for a tracked file within its bucket: the path relative to the
    /// project root, with forward slashes.
    pub fn entry_key(&self, file: &Path) -> Result<String> {
        self.tracked_rel(file)
    }

    fn tracked_rel(&self, file: &Path) -> Result<String> {
        relative_str(&self.project_root, file).ok_or_else(|| {
            FreshcacheError::OutsideProjectRoot {
                path: file.to_path_buf(),
                root: self.project_root.clone(),
            }
        })
    }

    async fn read_bucket_doc(&self, doc_path: &Path) -> Result<Bucket> {
        let raw = match tokio::fs::read_to_string(doc_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(doc = ?doc_path, "bucket document missing, starting empty");
                return Ok(Bucket::default());
            }
            Err(e) => return Err(FreshcacheError::IoError(e)),
        };

        self.documents_read.fetch_add(1, Ordering::Relaxed);
        serde_json::from_str(&raw).map_err(|source| FreshcacheError::MalformedBucket {
            path: doc_path.to_path_buf(),
            source,
        })
    }
}
