//! Provider configuration.

use serde::{Deserialize, Serialize};

use crate::error::{EmbeddingError, Result};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default embedding model.
pub const DEFAULT_MODEL: &str = "text-embedding-ada-002";

/// Configuration for the embedding provider.
///
/// The API key is never serialized; it comes from the environment or the
/// command line and is checked by [`EmbeddingConfig::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// API key sent as a bearer token.
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Model used for every request in a run.
    pub model: String,

    /// API base URL, without the `/embeddings` suffix.
    pub base_url: String,

    /// Per-request timeout. `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

impl EmbeddingConfig {
    /// Create a configuration with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Read the API key from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Read the API key through `lookup`, which maps a variable name to its value.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: lookup(API_KEY_ENV),
            ..Self::default()
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Check the configuration and return the trimmed API key.
    pub fn validate(&self) -> Result<&str> {
        let key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(EmbeddingError::MissingApiKey {
                env_var: API_KEY_ENV,
            })?;

        if self.model.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig(
                "model name is empty".to_string(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig(
                "base URL is empty".to_string(),
            ));
        }

        Ok(key)
    }

    /// Full URL of the embeddings endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/embeddings", self.base_url.trim_end_matches('/'))
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}
