//! Veille main entry point
//!
//! Command-line interface for the Veille product-listing crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use veille::browser::HttpBrowser;
use veille::config::{load_config_with_hash, OutputTarget};
use veille::crawler::Orchestrator;
use veille::storage::open_store;

/// Veille: a paginated product-listing crawler
///
/// Walks a paginated listing source, extracts structured attributes from
/// each item's free-text description, and persists records it has not seen
/// before.
#[derive(Parser, Debug)]
#[command(name = "veille")]
#[command(version = "1.0.0")]
#[command(about = "A paginated product-listing crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show store statistics and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("veille=info,warn"),
            1 => EnvFilter::new("veille=debug,info"),
            2 => EnvFilter::new("veille=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &veille::config::Config) {
    println!("=== Veille Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Listing template: {}", config.crawler.base_url);
    println!("  Max pages: {}", config.crawler.max_pages);
    if config.crawler.stop_word.is_empty() {
        println!("  Stop word: (disabled)");
    } else {
        println!("  Stop word: {}", config.crawler.stop_word);
    }
    println!("  Page timeout: {}ms", config.crawler.page_timeout_ms);
    println!("  Fetch attempts per item: {}", config.crawler.fetch_attempts);

    println!("\nOutput:");
    match config.output.target {
        OutputTarget::Store => println!("  Database: {}", config.output.database_path),
        OutputTarget::File => println!("  Stream: {}", config.output.stream_path),
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl up to {} listing pages",
        config.crawler.max_pages
    );
}

/// Handles the --stats mode: shows store statistics
fn handle_stats(config: &veille::config::Config) -> anyhow::Result<()> {
    let store = open_store(&config.output)?;
    let count = store.count()?;

    match config.output.target {
        OutputTarget::Store => println!("Database: {}", config.output.database_path),
        OutputTarget::File => println!("Stream: {}", config.output.stream_path),
    }
    println!("Stored products: {}", count);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: veille::config::Config) -> anyhow::Result<()> {
    let browser = HttpBrowser::new(&config.http)?;
    let store = open_store(&config.output)?;

    let mut orchestrator = Orchestrator::new(config, Box::new(browser), store);

    match orchestrator.run().await {
        Ok(report) => {
            println!("Crawl completed: {}", report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
