use anyhow::Context;
use clap::Parser;
use docmatch_cli::{Cli, render_outcome};
use docmatch_retrieval::Retriever;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.into_config().context("failed to load configuration")?;
    info!(
        "Searching {} for {:?}",
        config.corpus_dir.display(),
        config.query
    );

    let retriever = Retriever::from_config(config).context("invalid embedding configuration")?;
    let outcome = retriever.run().await.context("search failed")?;

    print!("{}", render_outcome(&outcome));
    Ok(())
}
