//! # Embeddings
//!
//! Embedding generation and similarity ranking for docmatch.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert text to dense vectors through an
//!   OpenAI-compatible API
//! - **Batch Fan-out**: Embed many texts concurrently, optionally bounded
//! - **Similarity Ranking**: Score texts against a query by cosine similarity
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings System                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingConfig ──► EmbeddingProvider ──► embed_all            │
//! │                            │                   │                │
//! │                            ▼                   ▼                │
//! │                     EmbeddingResponse    EmbeddedText ──► rank  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod provider;
pub mod similarity;

pub use batch::{BatchFailure, BatchMode, BatchOptions, BatchReport, embed_all};
pub use config::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, EmbeddingConfig};
pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, EmbeddingResponse, OpenAIProvider};
pub use similarity::{
    EmbeddedText, ScoredDocument, best_match, cosine_similarity, rank, sort_by_similarity,
};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;
