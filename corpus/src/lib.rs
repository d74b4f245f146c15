//! # Corpus
//!
//! Loads the plain-text documents that docmatch ranks against a query.
//! A corpus is a single directory; every `.txt` file directly inside it is
//! one document.

pub mod config;
pub mod error;
pub mod loader;

pub use config::{CorpusConfig, DEFAULT_EXTENSION};
pub use error::{CorpusError, Result};
pub use loader::{CorpusLoader, Document, load_texts};
