//! Configuration for a retrieval run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use docmatch_embeddings::{BatchOptions, EmbeddingConfig};

use crate::error::{Result, RetrievalError};

/// Query used when none is given.
pub const DEFAULT_QUERY: &str = "some rust code";

/// Name of the corpus directory looked up next to the executable.
pub const DEFAULT_CORPUS_DIR: &str = "texts";

/// Configuration for a retrieval run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Directory holding the corpus documents.
    pub corpus_dir: PathBuf,

    /// Document extension, without the dot.
    pub extension: String,

    /// Whether symlinked documents are read.
    pub follow_symlinks: bool,

    /// Text to search for.
    pub query: String,

    /// Embedding provider configuration.
    pub embedding: EmbeddingConfig,

    /// Corpus batch embedding options.
    pub batch: BatchOptions,
}

impl RetrievalConfig {
    /// Create a configuration for the given corpus directory.
    pub fn new(corpus_dir: impl Into<PathBuf>) -> Self {
        Self {
            corpus_dir: corpus_dir.into(),
            extension: docmatch_corpus::DEFAULT_EXTENSION.to_string(),
            follow_symlinks: true,
            query: DEFAULT_QUERY.to_string(),
            embedding: EmbeddingConfig::default(),
            batch: BatchOptions::default(),
        }
    }

    /// Load a configuration from a TOML file.
    ///
    /// The API key is never read from the file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| RetrievalError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| RetrievalError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the embedding configuration.
    pub fn with_embedding(mut self, config: EmbeddingConfig) -> Self {
        self.embedding = config;
        self
    }

    /// Set the batch options.
    pub fn with_batch(mut self, options: BatchOptions) -> Self {
        self.batch = options;
        self
    }

    /// Corpus loader configuration derived from this config.
    pub fn corpus(&self) -> docmatch_corpus::CorpusConfig {
        let config =
            docmatch_corpus::CorpusConfig::new(&self.corpus_dir).with_extension(&self.extension);
        if self.follow_symlinks {
            config
        } else {
            config.no_follow_symlinks()
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self::new(default_corpus_dir())
    }
}

/// The `texts` directory beside the running executable, or under the
/// working directory when the executable path is unknown.
pub fn default_corpus_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(DEFAULT_CORPUS_DIR)
}
