// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreshcacheError {
    #[error("Malformed bucket document {path:?}: {source}")]
    MalformedBucket {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Tracked path {path:?} is outside the project root {root:?}")]
    OutsideProjectRoot { path: PathBuf, root: PathBuf },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, FreshcacheError>;
