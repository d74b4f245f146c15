//! Error types for the retrieval engine.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur in the retrieval engine.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Corpus loading error.
    #[error("corpus error: {0}")]
    Corpus(#[from] docmatch_corpus::CorpusError),

    /// Embedding provider setup error.
    #[error("embedding error: {0}")]
    Embedding(#[from] docmatch_embeddings::EmbeddingError),

    /// The query could not be embedded.
    #[error("failed to embed query: {0}")]
    QueryEmbedding(#[source] docmatch_embeddings::EmbeddingError),

    /// Scoring the corpus against the query failed.
    #[error("failed to rank documents: {0}")]
    Ranking(#[source] docmatch_embeddings::EmbeddingError),

    /// Nothing was left to rank.
    #[error("no embedded documents to rank against the query")]
    NoCandidates,

    /// Configuration file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML.
    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl RetrievalError {
    /// Whether this error is a configuration problem found before any request.
    pub fn is_config(&self) -> bool {
        match self {
            Self::Embedding(err) => err.is_config(),
            Self::ConfigRead { .. } | Self::ConfigParse { .. } => true,
            _ => false,
        }
    }
}
