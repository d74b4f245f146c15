//! Reads the documents of a corpus directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::CorpusConfig;
use crate::error::{CorpusError, Result};

/// A loaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Where the document was read from.
    pub path: PathBuf,

    /// Full file contents.
    pub text: String,
}

/// Loads the documents directly inside a directory.
///
/// Only the top level is read; subdirectories are ignored. Documents come
/// back in directory-listing order, which is stable for an unchanged
/// directory but not sorted.
pub struct CorpusLoader {
    config: CorpusConfig,
}

impl CorpusLoader {
    /// Create a new loader.
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    /// The directory this loader reads.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Read every matching document.
    pub fn load(&self) -> Result<Vec<Document>> {
        let start = Instant::now();
        let root = self.path();

        if !root.exists() {
            return Err(CorpusError::DirectoryNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(CorpusError::NotADirectory(root.to_path_buf()));
        }

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_symlinks);

        let mut documents = Vec::new();
        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_file() || !self.config.matches(path) {
                debug!("Skipping {}", path.display());
                continue;
            }

            let text = fs::read_to_string(path).map_err(|source| CorpusError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            debug!("Read {} ({} bytes)", path.display(), text.len());

            documents.push(Document {
                path: path.to_path_buf(),
                text,
            });
        }

        info!(
            "Read {} documents from {} in {:?}",
            documents.len(),
            root.display(),
            start.elapsed()
        );
        Ok(documents)
    }

    /// Read every matching document and keep only the text.
    pub fn load_texts(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_iter().map(|doc| doc.text).collect())
    }
}

/// Read the `.txt` documents directly inside `dir`.
pub fn load_texts(dir: impl Into<PathBuf>) -> Result<Vec<String>> {
    CorpusLoader::new(CorpusConfig::new(dir)).load_texts()
}
