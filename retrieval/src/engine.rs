//! Retrieval engine: load, embed, rank, pick the winner.

use std::sync::Arc;

use tracing::{debug, error, info};

use docmatch_corpus::CorpusLoader;
use docmatch_embeddings::{
    BatchReport, Embedding, EmbeddingError, EmbeddingProvider, OpenAIProvider, ScoredDocument,
    best_match, embed_all, rank, sort_by_similarity,
};

use crate::config::RetrievalConfig;
use crate::error::{Result, RetrievalError};

/// Outcome of embedding the corpus.
///
/// A failure is a value rather than an error so the caller decides how to
/// proceed; [`Retriever::run`] continues with an empty corpus.
#[derive(Debug)]
pub enum CorpusEmbedding {
    /// The batch finished (possibly with per-item failures in partial mode).
    Embedded(BatchReport),

    /// The batch failed as a whole.
    Failed(EmbeddingError),
}

impl CorpusEmbedding {
    /// The embedded texts, or an empty report after a failure.
    pub fn into_report(self) -> BatchReport {
        match self {
            Self::Embedded(report) => report,
            Self::Failed(err) => {
                error!("Failed to create corpus embeddings: {err}");
                BatchReport::default()
            }
        }
    }
}

/// Result of a retrieval run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The query that was searched for.
    pub query: String,

    /// Every ranked document, best first.
    pub scores: Vec<ScoredDocument>,

    /// The best match.
    pub winner: ScoredDocument,

    /// Documents that were loaded but could not be embedded.
    pub skipped: usize,
}

/// Runs a query against a directory of documents.
pub struct Retriever {
    /// Configuration.
    config: RetrievalConfig,

    /// Embedding provider shared by corpus and query requests.
    provider: Arc<dyn EmbeddingProvider>,
}

impl Retriever {
    /// Create a retriever backed by the OpenAI provider.
    ///
    /// Fails on a missing API key before anything touches the network.
    pub fn from_config(config: RetrievalConfig) -> Result<Self> {
        let provider = OpenAIProvider::new(&config.embedding)?;
        info!("Using {} embeddings with model {}", provider.name(), provider.model());
        Ok(Self::with_provider(config, Arc::new(provider)))
    }

    /// Create a retriever with a specific provider.
    pub fn with_provider(config: RetrievalConfig, provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { config, provider }
    }

    /// Read the corpus texts.
    pub fn load_corpus(&self) -> Result<Vec<String>> {
        Ok(CorpusLoader::new(self.config.corpus()).load_texts()?)
    }

    /// Embed the corpus texts as one batch.
    pub async fn embed_corpus(&self, texts: &[String]) -> CorpusEmbedding {
        match embed_all(self.provider.as_ref(), texts, &self.config.batch).await {
            Ok(report) => CorpusEmbedding::Embedded(report),
            Err(err) => CorpusEmbedding::Failed(err),
        }
    }

    /// Embed the query text.
    pub async fn embed_query(&self, query: &str) -> Result<Embedding> {
        let response = self
            .provider
            .embed(query)
            .await
            .map_err(RetrievalError::QueryEmbedding)?;
        Ok(response.embedding)
    }

    /// Run the configured query end to end.
    pub async fn run(&self) -> Result<SearchOutcome> {
        self.search(&self.config.query).await
    }

    /// Find the corpus document most similar to `query`.
    ///
    /// If the corpus batch fails the run carries on with no documents, so
    /// the query is still embedded and the search then ends in
    /// [`RetrievalError::NoCandidates`].
    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        let texts = self.load_corpus()?;

        let report = self.embed_corpus(&texts).await.into_report();
        let skipped = texts.len() - report.embedded.len();

        let query_embedding = self.embed_query(query).await?;

        let mut scores = rank(&report.embedded, &query_embedding).map_err(RetrievalError::Ranking)?;
        sort_by_similarity(&mut scores);
        for score in &scores {
            debug!("similarity {:.4}: {}", score.similarity, preview(&score.text));
        }

        let winner = best_match(&scores)
            .cloned()
            .ok_or(RetrievalError::NoCandidates)?;
        info!(
            "Found {query:?} in text with similarity {:.4}: {}",
            winner.similarity,
            preview(&winner.text)
        );

        Ok(SearchOutcome {
            query: query.to_string(),
            scores,
            winner,
            skipped,
        })
    }
}

fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 60;
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > MAX_CHARS {
        format!("{}…", line.chars().take(MAX_CHARS).collect::<String>())
    } else {
        line.to_string()
    }
}
