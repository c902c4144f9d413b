//! Persistence error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a store document
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading, writing or removing the file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document exists but is not valid JSON of the expected shape
    #[error("malformed document {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no saved configuration number {0}")]
    NoSuchRecord(usize),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed { path: path.into(), source }
    }
}

/// Convenience result alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
