//! Configuration for corpus loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Extension of documents picked up by default.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Configuration for a corpus directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Path to the directory.
    pub path: PathBuf,

    /// File extension (without the dot) of documents to load.
    pub extension: String,

    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
}

impl CorpusConfig {
    /// Create a new corpus config.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            follow_symlinks: true,
        }
    }

    /// Load files with a different extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Do not follow symbolic links.
    pub fn no_follow_symlinks(mut self) -> Self {
        self.follow_symlinks = false;
        self
    }

    /// Whether `path` names a document this corpus includes.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy() == self.extension.as_str())
    }
}
