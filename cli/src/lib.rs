//! Argument handling and output formatting for the `docmatch` binary.

use std::path::PathBuf;

use clap::Parser;
use docmatch_retrieval::{
    BatchMode, EmbeddingConfig, RetrievalConfig, SearchOutcome, default_corpus_dir,
};

/// Find the text file in a directory that best matches a query.
#[derive(Debug, Parser)]
#[command(name = "docmatch", version, about)]
pub struct Cli {
    /// Text to search for. Defaults to the config file's query.
    pub query: Option<String>,

    /// Directory of documents (defaults to `texts/` beside the executable)
    #[arg(short, long, env = "DOCMATCH_DIR")]
    pub dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "DOCMATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// API key for the embeddings endpoint (defaults to `OPENAI_API_KEY`)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Embedding model identifier
    #[arg(long, env = "DOCMATCH_MODEL")]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "DOCMATCH_BASE_URL")]
    pub base_url: Option<String>,

    /// Seconds to wait for each embedding request
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Max embedding requests in flight (unbounded when unset)
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Rank the documents that embedded successfully instead of failing the batch
    #[arg(long, default_value_t = false)]
    pub partial: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the run configuration: config file first, then the environment,
    /// then flags on top.
    pub fn into_config(self) -> docmatch_retrieval::Result<RetrievalConfig> {
        self.into_config_with(EmbeddingConfig::from_env())
    }

    /// Like [`Cli::into_config`], taking the API key from `env` when no
    /// `--api-key` flag was given.
    pub fn into_config_with(
        self,
        env: EmbeddingConfig,
    ) -> docmatch_retrieval::Result<RetrievalConfig> {
        let mut config = match &self.config {
            Some(path) => RetrievalConfig::from_toml_file(path)?,
            None => RetrievalConfig::new(default_corpus_dir()),
        };

        if let Some(dir) = self.dir {
            config.corpus_dir = dir;
        }
        if let Some(query) = self.query {
            config.query = query;
        }

        let embedding: &mut EmbeddingConfig = &mut config.embedding;
        embedding.api_key = self.api_key.or(env.api_key);
        if let Some(model) = self.model {
            embedding.model = model;
        }
        if let Some(base_url) = self.base_url {
            embedding.base_url = base_url;
        }
        if let Some(secs) = self.timeout_secs {
            embedding.timeout_secs = Some(secs);
        }

        if let Some(limit) = self.max_concurrency {
            config.batch.max_concurrency = Some(limit);
        }
        if self.partial {
            config.batch.mode = BatchMode::Partial;
        }

        Ok(config)
    }

    /// Default log filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Human-readable report of a search: every score, then the winning text.
pub fn render_outcome(outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    for score in &outcome.scores {
        let first_line = score.text.lines().next().unwrap_or_default();
        out.push_str(&format!("{:>8.4}  {first_line}\n", score.similarity));
    }
    if outcome.skipped > 0 {
        out.push_str(&format!(
            "({} documents could not be embedded)\n",
            outcome.skipped
        ));
    }
    out.push_str(&format!(
        "\nFound {:?} in text (similarity {:.4}):\n{}\n",
        outcome.query, outcome.winner.similarity, outcome.winner.text
    ));
    out
}
