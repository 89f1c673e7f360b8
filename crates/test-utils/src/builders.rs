use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use freshcache::store::CacheStore;

/// A throwaway project directory for cache tests.
///
/// Wraps a [`TempDir`] (removed on drop) and offers helpers for seeding
/// tracked files and constructing a [`CacheStore`] rooted at the project.
pub struct TempProject {
    dir: TempDir,
}

impl TempProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("creating temp project dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a tracked file at a path relative to the project root, creating
    /// parent directories as needed. Returns the absolute path.
    pub fn write_file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("creating parent dirs for tracked file");
        }
        fs::write(&path, contents).expect("writing tracked file");
        path
    }

    /// Fresh store for this project, cache root at the default location.
    pub fn store(&self) -> Arc<CacheStore> {
        Arc::new(CacheStore::for_project(self.root()))
    }
}

impl Default for TempProject {
    fn default() -> Self {
        Self::new()
    }
}
