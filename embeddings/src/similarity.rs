//! Similarity computation and ranking for embeddings.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// A text paired with its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedText {
    /// The text that was embedded.
    pub text: String,

    /// The embedding vector.
    pub values: Embedding,
}

impl EmbeddedText {
    pub fn new(text: impl Into<String>, values: Embedding) -> Self {
        Self {
            text: text.into(),
            values,
        }
    }
}

/// A corpus text scored against a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// The corpus text.
    pub text: String,

    /// Cosine similarity with the query.
    pub similarity: f32,
}

/// Compute the cosine similarity between two embeddings.
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 means identical direction
/// - 0.0 means orthogonal vectors
/// - -1.0 means opposite vectors
///
/// A zero-magnitude input yields [`EmbeddingError::ZeroMagnitude`] instead of NaN.
/// Sums are accumulated in `f64` so very small or very large components
/// neither underflow to zero nor overflow to infinity.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let (dot_product, norm_a, norm_b) = a.iter().zip(b).fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(EmbeddingError::ZeroMagnitude);
    }

    let similarity = dot_product / (norm_a.sqrt() * norm_b.sqrt());
    if !similarity.is_finite() {
        return Err(EmbeddingError::NonFinite);
    }

    // rounding can land a hair outside [-1, 1]
    Ok(similarity.clamp(-1.0, 1.0) as f32)
}

/// Score every corpus entry against the query.
///
/// The output has one entry per input, in input order.
pub fn rank(corpus: &[EmbeddedText], query: &[f32]) -> Result<Vec<ScoredDocument>> {
    corpus
        .iter()
        .map(|entry| {
            let similarity = cosine_similarity(query, &entry.values)?;
            debug!("Scored candidate at {similarity:.4}");
            Ok(ScoredDocument {
                text: entry.text.clone(),
                similarity,
            })
        })
        .collect()
}

/// Sort scores descending by similarity.
///
/// The sort is stable, but the order among equal scores is not part of the
/// contract.
pub fn sort_by_similarity(scores: &mut [ScoredDocument]) {
    scores.sort_by_key(|s| std::cmp::Reverse(OrderedFloat(s.similarity)));
}

/// The highest-scoring document, if any.
///
/// On ties the earliest entry wins, so on sorted scores this is the first one.
pub fn best_match(scores: &[ScoredDocument]) -> Option<&ScoredDocument> {
    scores.iter().reduce(|best, candidate| {
        if OrderedFloat(candidate.similarity) > OrderedFloat(best.similarity) {
            candidate
        } else {
            best
        }
    })
}
