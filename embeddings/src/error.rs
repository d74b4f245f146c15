//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur in the embeddings system.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// No API key was supplied, or it was blank.
    #[error("embedding API key is not set (expected {env_var})")]
    MissingApiKey { env_var: &'static str },

    /// Any other invalid provider configuration.
    #[error("invalid embedding configuration: {0}")]
    InvalidConfig(String),

    /// API request failed with a non-success status.
    #[error("API request failed with status {status}: {message}")]
    ApiRequest { status: u16, message: String },

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Cosine similarity is undefined for a zero-magnitude vector.
    #[error("cannot compare a zero-magnitude vector")]
    ZeroMagnitude,

    /// The similarity could not be represented as a finite number.
    #[error("similarity is not a finite number")]
    NonFinite,

    /// One request of a batch failed, failing the whole batch.
    #[error("embedding request {index} of batch failed: {source}")]
    BatchItem {
        index: usize,
        #[source]
        source: Box<EmbeddingError>,
    },

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl EmbeddingError {
    /// Whether this error comes from configuration rather than a request.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingApiKey { .. } | Self::InvalidConfig(_))
    }
}
