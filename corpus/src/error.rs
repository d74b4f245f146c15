//! Error types for corpus loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Errors that can occur while loading a corpus.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Directory not found.
    #[error("corpus directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Path exists but is not a directory.
    #[error("corpus path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Listing the directory failed.
    #[error("failed to list corpus directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A document could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
