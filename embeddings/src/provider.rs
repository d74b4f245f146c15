//! Embedding providers.
//!
//! One request embeds one text. The OpenAI provider talks to any
//! OpenAI-compatible `/embeddings` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EmbeddingConfig;
use crate::error::{EmbeddingError, Result};
use crate::Embedding;

/// Response from embedding generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// The generated embedding.
    pub embedding: Embedding,

    /// Model reported by the provider.
    pub model: String,

    /// Dimension of the embedding.
    pub dimension: usize,

    /// Token usage (if available).
    pub tokens_used: Option<u64>,
}

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Model used for every request.
    fn model(&self) -> &str;

    /// Generate an embedding for the given text.
    async fn embed(&self, text: &str) -> Result<EmbeddingResponse>;
}

/// OpenAI embedding provider.
#[derive(Debug)]
pub struct OpenAIProvider {
    /// Validated API key.
    api_key: String,

    /// Full embeddings endpoint URL.
    endpoint: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model sent with every request.
    model: String,
}

impl OpenAIProvider {
    /// Create a provider from a configuration.
    ///
    /// Fails with [`EmbeddingError::MissingApiKey`] before any network
    /// activity when no usable key is configured.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = config.validate()?.to_string();

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            api_key,
            endpoint: config.endpoint(),
            client,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingResponse> {
        debug!("Requesting embedding with model {} for {} chars", self.model, text.len());

        let body = serde_json::json!({
            "input": text,
            "model": self.model,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(EmbeddingError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiRequest {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let result: OpenAIEmbeddingResponse = serde_json::from_slice(&bytes)
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        let embedding = result
            .data
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InvalidResponse("no embedding in response".to_string()))?
            .embedding;

        if embedding.is_empty() {
            return Err(EmbeddingError::InvalidResponse(
                "embedding is empty".to_string(),
            ));
        }

        let dimension = embedding.len();
        let tokens_used = result.usage.map(|u| u.total_tokens);
        debug!("Received embedding with {dimension} dimensions");

        Ok(EmbeddingResponse {
            embedding,
            model: result.model.unwrap_or_else(|| self.model.clone()),
            dimension,
            tokens_used,
        })
    }
}

/// OpenAI API response format.
#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingResponse {
    data: Vec<OpenAIEmbeddingData>,
    model: Option<String>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    total_tokens: u64,
}
