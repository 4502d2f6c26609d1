use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod triggers;

#[derive(Debug, Parser)]
#[command(name = "sintel-cli")]
#[command(about = "Sales-trigger news collection over NewsAPI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the sales trigger batch, save it, and print a summary
    Triggers(TriggersArgs),
    /// Fetch current top headlines for a country or category
    Headlines(HeadlinesArgs),
    /// Show today's API call count and the retained usage ledger
    Usage,
}

#[derive(Debug, Args)]
struct TriggersArgs {
    /// Number of days to look back
    #[arg(long, default_value_t = 7)]
    days_back: u32,

    /// Region appended to every query as an AND clause; pass '' to search globally
    #[arg(long, default_value = "Singapore")]
    region: String,

    /// Sort order: popularity, publishedAt, or relevancy
    #[arg(long, default_value = "publishedAt")]
    sort_by: sintel_newsapi::SortBy,

    /// Trigger catalog file; falls back to the built-in catalog when absent
    #[arg(long)]
    triggers_path: Option<PathBuf>,

    /// Output file name under the data directory
    #[arg(long, default_value = "sales_triggers.json")]
    output: String,
}

#[derive(Debug, Args)]
struct HeadlinesArgs {
    /// Two-letter country code (e.g. sg, us, gb)
    #[arg(long, default_value = "sg")]
    country: String,

    /// Category: business, technology, science, ...
    #[arg(long)]
    category: Option<String>,

    /// Comma-separated source identifiers (e.g. bbc-news,cnn)
    #[arg(long)]
    sources: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // load_app_config pulls in .env before reading the environment
    let config = sintel_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    match cli.command {
        Some(Commands::Triggers(args)) => triggers::run_triggers(&config, &args).await,
        Some(Commands::Headlines(args)) => triggers::run_headlines(&config, &args).await,
        Some(Commands::Usage) => triggers::run_usage(&config),
        // bare invocation runs the default batch
        None => {
            let args = TriggersArgs {
                days_back: 7,
                region: "Singapore".to_string(),
                sort_by: sintel_newsapi::SortBy::PublishedAt,
                triggers_path: None,
                output: "sales_triggers.json".to_string(),
            };
            triggers::run_triggers(&config, &args).await
        }
    }
}
