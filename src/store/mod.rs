// src/store/mod.rs

//! Durable, directory-partitioned store of content fingerprints.
//!
//! Every tracked file resolves to one "bucket": a JSON document holding the
//! fingerprint entries for all tracked files in the same directory. Buckets
//! are read and written as whole documents, and mirrored in a process-lifetime
//! in-memory overlay so each document is read from disk at most once per run.

pub mod bucket;
pub mod path_utils;
#[allow(clippy::module_inception)]
pub mod store;

pub use bucket::{Bucket, CacheEntry, BUCKET_SUFFIX};
pub use store::{CacheStore, StoreStats, DEFAULT_CACHE_DIR};
