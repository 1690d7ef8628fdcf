use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pubmed_paper_fetcher::output::DEFAULT_CSV_FILENAME;
use pubmed_paper_fetcher::{save_to_csv, ClientConfig, PaperFetcher, DEFAULT_MAX_RESULTS};

#[derive(Parser)]
#[command(
    name = "pubmed-paper-fetcher",
    about = "Fetch PubMed papers with non-academic authors and save them as CSV"
)]
struct Cli {
    /// Search query for PubMed (supports PubMed boolean/field syntax)
    #[arg(short, long)]
    query: String,

    /// Filename to save results as CSV
    #[arg(short, long, default_value = DEFAULT_CSV_FILENAME)]
    file: PathBuf,

    /// Maximum number of results to fetch
    #[arg(short, long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,

    /// API key for NCBI E-utilities
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_target(false)
        .init();

    ensure!(cli.max_results > 0, "--max-results must be a positive integer");

    let config = ClientConfig::new(cli.api_key);
    let fetcher = PaperFetcher::new(config).context("failed to initialize PubMed client")?;

    let records = fetcher
        .run(&cli.query, cli.max_results)
        .await
        .context("failed to fetch papers")?;

    if records.is_empty() {
        info!("No papers found for the given query");
    }

    save_to_csv(&records, &cli.file)
        .with_context(|| format!("failed to write {}", cli.file.display()))?;
    info!(path = %cli.file.display(), "Results saved");

    Ok(())
}
