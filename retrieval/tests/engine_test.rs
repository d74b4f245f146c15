//! End-to-end tests for the retriever with an in-memory embedding provider.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docmatch_embeddings::{EmbeddingError, EmbeddingResponse};
use docmatch_retrieval::{
    BatchMode, BatchOptions, EmbeddingProvider, RetrievalConfig, RetrievalError, Retriever,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const QUERY: &str = "some rust code";

/// Looks embeddings up by exact text; unknown texts fail like a 400.
struct FixedProvider {
    vectors: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FixedProvider {
    fn new(entries: &[(&str, Vec<f32>)]) -> Arc<Self> {
        Arc::new(Self {
            vectors: entries
                .iter()
                .map(|(text, values)| (text.to_string(), values.clone()))
                .collect(),
            calls: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn was_asked(&self, text: &str) -> bool {
        self.requested.lock().unwrap().iter().any(|t| t == text)
    }
}

#[async_trait]
impl EmbeddingProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    fn model(&self) -> &str {
        "fixed-model"
    }

    async fn embed(&self, text: &str) -> docmatch_embeddings::Result<EmbeddingResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(text.to_string());
        let embedding = self
            .vectors
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::ApiRequest {
                status: 400,
                message: format!("unknown text {text:?}"),
            })?;
        Ok(EmbeddingResponse {
            dimension: embedding.len(),
            embedding,
            model: "fixed-model".to_string(),
            tokens_used: None,
        })
    }
}

fn write_corpus(dir: &Path, files: &[(&str, &str)]) {
    for (name, contents) in files {
        std::fs::write(dir.join(name), contents).unwrap();
    }
}

fn orthogonal_corpus(dir: &Path) -> Arc<FixedProvider> {
    write_corpus(
        dir,
        &[
            ("a.txt", "doc A"),
            ("b.txt", "doc B"),
            ("c.txt", "doc C"),
            ("notes.md", "ignored"),
        ],
    );
    FixedProvider::new(&[
        ("doc A", vec![1.0, 0.0, 0.0]),
        ("doc B", vec![0.0, 1.0, 0.0]),
        ("doc C", vec![0.0, 0.0, 1.0]),
        (QUERY, vec![0.0, 1.0, 0.0]),
    ])
}

#[tokio::test]
async fn test_identical_vector_wins() {
    let temp_dir = TempDir::new().unwrap();
    let provider = orthogonal_corpus(temp_dir.path());
    let retriever = Retriever::with_provider(RetrievalConfig::new(temp_dir.path()), provider.clone());

    let outcome = retriever.run().await.unwrap();

    assert_eq!(outcome.query, QUERY);
    assert_eq!(outcome.winner.text, "doc B");
    assert!((outcome.winner.similarity - 1.0).abs() < 1e-6);
    assert_eq!(outcome.scores.len(), 3);
    assert_eq!(outcome.scores[0], outcome.winner);
    for other in &outcome.scores[1..] {
        assert!(other.text == "doc A" || other.text == "doc C");
        assert!(other.similarity.abs() < 1e-6);
    }
    assert_eq!(outcome.skipped, 0);
    // three documents plus the query
    assert_eq!(provider.calls(), 4);
}

#[tokio::test]
async fn test_search_with_other_query() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path(), &[("a.txt", "doc A"), ("c.txt", "doc C")]);
    let provider = FixedProvider::new(&[
        ("doc A", vec![1.0, 0.0]),
        ("doc C", vec![0.6, 0.8]),
        ("console.log()", vec![0.0, 1.0]),
    ]);
    let retriever = Retriever::with_provider(RetrievalConfig::new(temp_dir.path()), provider);

    let outcome = retriever.search("console.log()").await.unwrap();

    assert_eq!(outcome.winner.text, "doc C");
    assert!((outcome.winner.similarity - 0.8).abs() < 1e-6);
}

#[tokio::test]
async fn test_corpus_failure_continues_then_finds_nothing() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path(), &[("a.txt", "doc A"), ("x.txt", "unknown")]);
    let provider = FixedProvider::new(&[("doc A", vec![1.0, 0.0]), (QUERY, vec![1.0, 0.0])]);
    let retriever = Retriever::with_provider(RetrievalConfig::new(temp_dir.path()), provider.clone());

    let err = retriever.run().await.unwrap_err();

    assert!(matches!(err, RetrievalError::NoCandidates));
    // the query is still embedded after the corpus batch fails
    assert!(provider.was_asked(QUERY));
}

#[tokio::test]
async fn test_partial_mode_ranks_what_succeeded() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path(), &[("a.txt", "doc A"), ("x.txt", "unknown")]);
    let provider = FixedProvider::new(&[("doc A", vec![1.0, 0.0]), (QUERY, vec![1.0, 0.0])]);
    let config = RetrievalConfig::new(temp_dir.path())
        .with_batch(BatchOptions::default().with_mode(BatchMode::Partial));
    let retriever = Retriever::with_provider(config, provider);

    let outcome = retriever.run().await.unwrap();

    assert_eq!(outcome.winner.text, "doc A");
    assert_eq!(outcome.skipped, 1);
}

#[tokio::test]
async fn test_query_failure_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path(), &[("a.txt", "doc A")]);
    let provider = FixedProvider::new(&[("doc A", vec![1.0, 0.0])]);
    let retriever = Retriever::with_provider(RetrievalConfig::new(temp_dir.path()), provider);

    let err = retriever.run().await.unwrap_err();

    assert!(matches!(
        err,
        RetrievalError::QueryEmbedding(EmbeddingError::ApiRequest { status: 400, .. })
    ));
}

#[tokio::test]
async fn test_empty_corpus_has_no_candidates() {
    let temp_dir = TempDir::new().unwrap();
    let provider = FixedProvider::new(&[(QUERY, vec![1.0])]);
    let retriever = Retriever::with_provider(RetrievalConfig::new(temp_dir.path()), provider.clone());

    let err = retriever.run().await.unwrap_err();

    assert!(matches!(err, RetrievalError::NoCandidates));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_missing_directory_is_fatal_before_requests() {
    let temp_dir = TempDir::new().unwrap();
    let provider = FixedProvider::new(&[(QUERY, vec![1.0])]);
    let config = RetrievalConfig::new(temp_dir.path().join("missing"));
    let retriever = Retriever::with_provider(config, provider.clone());

    let err = retriever.run().await.unwrap_err();

    assert!(matches!(err, RetrievalError::Corpus(_)));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_zero_vector_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path(), &[("a.txt", "doc A")]);
    let provider = FixedProvider::new(&[("doc A", vec![0.0, 0.0]), (QUERY, vec![1.0, 0.0])]);
    let retriever = Retriever::with_provider(RetrievalConfig::new(temp_dir.path()), provider);

    let err = retriever.run().await.unwrap_err();

    assert!(matches!(
        err,
        RetrievalError::Ranking(EmbeddingError::ZeroMagnitude)
    ));
}

#[tokio::test]
async fn test_query_dimension_mismatch_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path(), &[("a.txt", "doc A")]);
    let provider = FixedProvider::new(&[("doc A", vec![1.0, 0.0]), (QUERY, vec![1.0, 0.0, 0.0])]);
    let retriever = Retriever::with_provider(RetrievalConfig::new(temp_dir.path()), provider);

    let err = retriever.run().await.unwrap_err();

    assert!(matches!(
        err,
        RetrievalError::Ranking(EmbeddingError::DimensionMismatch { .. })
    ));
}

#[tokio::test]
async fn test_tied_scores_pick_first_ranked() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path(), &[("a.txt", "doc A"), ("b.txt", "doc B")]);
    let provider = FixedProvider::new(&[
        ("doc A", vec![1.0, 0.0]),
        ("doc B", vec![2.0, 0.0]),
        (QUERY, vec![3.0, 0.0]),
    ]);
    let retriever = Retriever::with_provider(RetrievalConfig::new(temp_dir.path()), provider);

    let outcome = retriever.run().await.unwrap();

    assert_eq!(outcome.winner, outcome.scores[0]);
    assert!((outcome.winner.similarity - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_extreme_magnitudes_rank_finitely() {
    let temp_dir = TempDir::new().unwrap();
    write_corpus(temp_dir.path(), &[("a.txt", "doc A"), ("b.txt", "doc B")]);
    let provider = FixedProvider::new(&[
        ("doc A", vec![1e20, -1e20]),
        ("doc B", vec![1e-30, 1.1e-30]),
        (QUERY, vec![1.0, 1.0]),
    ]);
    let retriever = Retriever::with_provider(RetrievalConfig::new(temp_dir.path()), provider);

    let outcome = retriever.run().await.unwrap();

    assert_eq!(outcome.winner.text, "doc B");
    assert!(outcome.scores.iter().all(|s| s.similarity.is_finite()));
}
