//! Wiki-Trawl main entry point
//!
//! This is the command-line interface for the Wiki-Trawl article crawler.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wiki_trawl::config::{load_config, validate, Config};
use wiki_trawl::crawler::{run_trawl, RunOutcome};
use wiki_trawl::output::{load_statistics, print_report, print_statistics};
use wiki_trawl::storage::SqliteLinkStore;
use wiki_trawl::url::validate_seed;

/// Exit status used when the run is interrupted
const EXIT_INTERRUPTED: u8 = 130;

/// Wiki-Trawl: a depth-bounded crawler for a wiki's internal article links
///
/// Starting from the seed article, Wiki-Trawl follows article links on the
/// same site up to a fixed depth and records every distinct link it finds in
/// a SQLite database. The database is reset at the start of every run.
#[derive(Parser, Debug)]
#[command(name = "wiki-trawl")]
#[command(version)]
#[command(about = "A depth-bounded crawler for a wiki's internal article links", long_about = None)]
struct Cli {
    /// Seed article URL (http or https)
    #[arg(value_name = "SEED_URL", required_unless_present = "stats")]
    seed: Option<String>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the traversal depth
    #[arg(long)]
    depth: Option<u32>,

    /// Override the pause before every request, in milliseconds
    #[arg(long, value_name = "MILLIS")]
    delay_ms: Option<u64>,

    /// Override the SQLite database path
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show statistics from the existing database and exit
    #[arg(long, conflicts_with = "seed")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    if cli.stats {
        handle_stats(&config)?;
        return Ok(ExitCode::SUCCESS);
    }

    // The seed is checked before the database is touched
    let raw_seed = cli.seed.as_deref().unwrap_or_default();
    let seed = validate_seed(raw_seed).context("Invalid seed URL")?;

    handle_trawl(&config, &seed).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_trawl=info,warn"),
            1 => EnvFilter::new("wiki_trawl=debug,info"),
            2 => EnvFilter::new("wiki_trawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.request_delay_ms = delay_ms;
    }
    if let Some(database) = &cli.database {
        config.output.database_path = database.display().to_string();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let store = SqliteLinkStore::open(Path::new(&config.output.database_path))
        .context("Failed to open link store")?;
    let stats = load_statistics(&store, 20).context("Failed to load statistics")?;

    print_statistics(&stats);
    Ok(())
}

/// Handles the main traversal
async fn handle_trawl(config: &Config, seed: &url::Url) -> anyhow::Result<ExitCode> {
    tracing::info!(
        "Starting traversal from {} (depth {}, {}ms between requests)",
        seed,
        config.crawler.max_depth,
        config.crawler.request_delay_ms
    );

    let outcome = run_trawl(config, seed, shutdown_signal())
        .await
        .context("Traversal could not start")?;

    print_report(outcome.report());

    match outcome {
        RunOutcome::Completed(_) => {
            tracing::info!("Traversal completed successfully");
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Interrupted(_) => Ok(ExitCode::from(EXIT_INTERRUPTED)),
    }
}

/// Resolves on Ctrl+C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::warn!("Received interrupt, stopping traversal"),
        Err(e) => {
            tracing::error!("Failed to listen for interrupt: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
