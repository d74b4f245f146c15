//! # Retrieval Engine
//!
//! Finds the document in a directory that best matches a query:
//!
//! - **Corpus**: read the `.txt` files of a directory
//! - **Embeddings**: embed every document and the query
//! - **Ranking**: score documents by cosine similarity and pick the best
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Retriever                                │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐          │
//! │  │    Corpus    │  │    Corpus    │  │    Query     │          │
//! │  │    Loader    │─►│  Embedding   │  │  Embedding   │          │
//! │  └──────────────┘  └──────────────┘  └──────────────┘          │
//! │                          │                  │                   │
//! │                          └────────┬─────────┘                   │
//! │                                   ▼                             │
//! │                          ┌──────────────┐                       │
//! │                          │  Rank + Sort │──► SearchOutcome      │
//! │                          └──────────────┘                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docmatch_retrieval::{RetrievalConfig, Retriever};
//!
//! let config = RetrievalConfig::new("./texts").with_query("some rust code");
//! let outcome = Retriever::from_config(config)?.run().await?;
//! println!("{}", outcome.winner.text);
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::{DEFAULT_CORPUS_DIR, DEFAULT_QUERY, RetrievalConfig, default_corpus_dir};
pub use engine::{CorpusEmbedding, Retriever, SearchOutcome};
pub use error::{Result, RetrievalError};

// Re-export from dependencies for convenience
pub use docmatch_embeddings::{
    API_KEY_ENV, BatchMode, BatchOptions, EmbeddingConfig, EmbeddingProvider, ScoredDocument,
};
