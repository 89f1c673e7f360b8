// src/track/mod.rs

//! Change detection and cache recording for tracked files.
//!
//! [`ChangeDetector`] is the read-only query: has this file changed since its
//! last committed record? [`CacheWriter`] is the only thing that creates or
//! updates records. Both hold a shared handle to one [`crate::store::CacheStore`].

pub mod detector;
pub mod writer;

pub use detector::{ChangeDetector, FileInfo, GRACE_PERIOD_MS, entry_changed};
pub use writer::CacheWriter;
