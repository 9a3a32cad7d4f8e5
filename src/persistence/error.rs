use std::path::PathBuf;
use thiserror::Error;

/// Failures of the persisted blob
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document is not a valid blob
    #[error("Stored data at {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The stored bytes are not UTF-8 text
    #[error("Stored data at {} is not valid UTF-8: {source}", path.display())]
    NotText {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Encoding the in-memory state failed
    #[error("Failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),

    /// Target path has no parent directory to hold the temp file
    #[error("File path has no parent directory: {}", .0.display())]
    NoParent(PathBuf),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. } | Self::NotText { .. })
    }
}
