//! Local persistence errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to read or write persisted client state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize storage: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Io { .. } => "E_STORE_IO",
            StorageError::Serialize(_) => "E_STORE_SERDE",
            StorageError::Unavailable(_) => "E_STORE_UNAVAILABLE",
        }
    }
}
