// src/lib.rs

//! Incremental change-detection cache.
//!
//! Given a tracked file, decide cheaply whether its content changed since the
//! last time it was observed, without re-processing unchanged files. Four
//! pieces collaborate, leaves first:
//!
//! - [`fingerprint`](crate::fingerprint) — weak, collision-tolerant 32-bit
//!   digest of a file's content.
//! - [`store`] — durable key/value store of fingerprint records, partitioned
//!   into per-directory "bucket" documents, mirrored in a process-lifetime
//!   in-memory overlay.
//! - [`track::ChangeDetector`] — the read-only query: re-read a file and
//!   report whether it differs from its last committed record.
//! - [`track::CacheWriter`] — re-read a file and commit its current
//!   fingerprint.
//!
//! Because the fingerprint is weak, a hash match alone never certifies
//! "unchanged": once the file's modification time has advanced past a fixed
//! grace period, the match is distrusted and the file reported as changed.
//! See [`track::GRACE_PERIOD_MS`].
//!
//! This is a library with no command-line surface; the embedding pipeline
//! constructs one [`store::CacheStore`] per run and hands out `Arc` clones.

pub mod errors;
pub mod fingerprint;
pub mod fsio;
pub mod logging;
pub mod store;
pub mod track;

pub use errors::{FreshcacheError, Result};
pub use fingerprint::fingerprint;
pub use store::{BUCKET_SUFFIX, Bucket, CacheEntry, CacheStore, DEFAULT_CACHE_DIR, StoreStats};
pub use track::{CacheWriter, ChangeDetector, FileInfo, GRACE_PERIOD_MS, entry_changed};
