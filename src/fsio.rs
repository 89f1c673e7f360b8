// src/fsio.rs

//! Async filesystem primitives consumed by the cache core.
//!
//! Thin wrappers around `tokio::fs` that attach path context to errors. The
//! cache core only ever needs four capabilities: read text, write text with
//! parent-directory creation, stat (modification time + is-directory), and an
//! existence check.

use std::path::Path;
use std::time::UNIX_EPOCH;

use anyhow::{Context, Result};
use tokio::fs;

/// File metadata as the cache core sees it.
#[derive(Debug, Clone, Copy)]
pub struct FileMeta {
    /// Modification time in milliseconds since the Unix epoch.
    pub modified_ms: i64,
    pub is_dir: bool,
}

/// Read a file's full content as UTF-8 text.
///
/// Fails if the path is missing or unreadable.
pub async fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .with_context(|| format!("reading file {:?}", path))
}

/// Write text to a file, creating any missing parent directories first.
pub async fn write(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating dir {:?}", parent))?;
    }
    fs::write(path, contents)
        .await
        .with_context(|| format!("writing to file {:?}", path))
}

/// Stat a path.
pub async fn metadata(path: &Path) -> Result<FileMeta> {
    let meta = fs::metadata(path)
        .await
        .with_context(|| format!("reading metadata for {:?}", path))?;
    let modified = meta
        .modified()
        .with_context(|| format!("reading modification time for {:?}", path))?;
    let modified_ms = modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    Ok(FileMeta {
        modified_ms,
        is_dir: meta.is_dir(),
    })
}

/// Modification time of a path, in milliseconds since the Unix epoch.
pub async fn modified_ms(path: &Path) -> Result<i64> {
    Ok(metadata(path).await?.modified_ms)
}

/// Whether a path exists at all.
pub async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
