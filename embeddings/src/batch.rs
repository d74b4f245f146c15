//! Concurrent embedding of many texts.
//!
//! Every text gets its own request. Requests run through an order-preserving
//! buffered stream, so results line up with their inputs no matter which
//! request finishes first.

use futures::StreamExt;
use futures::stream;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EmbeddingError, Result};
use crate::provider::EmbeddingProvider;
use crate::similarity::EmbeddedText;

/// How a batch reacts to a failed request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// The first failure fails the whole batch; no partial results.
    #[default]
    AllOrNothing,

    /// Keep successful results and report failures alongside them.
    Partial,
}

/// Options for [`embed_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Maximum requests in flight. `None` sends every request at once.
    pub max_concurrency: Option<usize>,

    /// Failure handling.
    pub mode: BatchMode,
}

impl BatchOptions {
    /// Cap the number of concurrent requests.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    /// Set the failure mode.
    pub fn with_mode(mut self, mode: BatchMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A request that failed inside a [`BatchMode::Partial`] batch.
#[derive(Debug)]
pub struct BatchFailure {
    /// Position of the text in the input.
    pub index: usize,

    /// Why the request failed.
    pub error: EmbeddingError,
}

/// Result of embedding a batch of texts.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Successful embeddings, in input order.
    pub embedded: Vec<EmbeddedText>,

    /// Failed requests. Always empty in [`BatchMode::AllOrNothing`].
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Whether every text was embedded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Embed every text with one request each.
pub async fn embed_all(
    provider: &dyn EmbeddingProvider,
    texts: &[String],
    options: &BatchOptions,
) -> Result<BatchReport> {
    if texts.is_empty() {
        return Ok(BatchReport::default());
    }

    let limit = options.max_concurrency.unwrap_or(texts.len()).max(1);
    debug!(
        "Embedding {} texts with {} via {} (concurrency {limit})",
        texts.len(),
        provider.model(),
        provider.name()
    );

    let mut responses = stream::iter(texts.iter().enumerate())
        .map(|(index, text)| async move { (index, provider.embed(text).await) })
        .buffered(limit);

    let mut report = BatchReport::default();
    let mut dimension: Option<usize> = None;

    while let Some((index, result)) = responses.next().await {
        let checked = result.and_then(|response| {
            let actual = response.embedding.len();
            let expected = *dimension.get_or_insert(actual);
            if actual == expected {
                Ok(response)
            } else {
                Err(EmbeddingError::DimensionMismatch { expected, actual })
            }
        });

        match checked {
            Ok(response) => {
                if let Some(tokens) = response.tokens_used {
                    debug!("Text {index} used {tokens} tokens");
                }
                report
                    .embedded
                    .push(EmbeddedText::new(texts[index].clone(), response.embedding));
            }
            Err(error) => match options.mode {
                BatchMode::AllOrNothing => {
                    return Err(EmbeddingError::BatchItem {
                        index,
                        source: Box::new(error),
                    });
                }
                BatchMode::Partial => {
                    warn!("Embedding request {index} failed: {error}");
                    report.failures.push(BatchFailure { index, error });
                }
            },
        }
    }

    info!(
        "Embedded {} of {} texts",
        report.embedded.len(),
        texts.len()
    );
    Ok(report)
}
