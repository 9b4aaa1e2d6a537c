//! Insta-Scout command-line interface
//!
//! Reads site URLs from a CSV column, runs one independent discovery per
//! row across a bounded worker pool, writes the annotated results, and
//! prints a summary report.

use anyhow::Context;
use clap::Parser;
use futures::stream::{self, StreamExt};
use insta_scout::engine::DiscoveryEngine;
use insta_scout::sheet::{self, ResultRow};
use insta_scout::{report, EngineConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Insta-Scout: discover Instagram handles from site URLs
///
/// Extracts handles from direct links and free text, and scans websites
/// when the input is a plain site URL.
#[derive(Parser, Debug)]
#[command(name = "insta-scout")]
#[command(version)]
#[command(about = "Discover Instagram handles from site URLs", long_about = None)]
struct Cli {
    /// CSV file with input rows
    #[arg(long)]
    input: PathBuf,

    /// Name of the column holding URLs
    #[arg(long)]
    column: String,

    /// Output CSV file
    #[arg(long, default_value = "instagram_results.csv")]
    output: PathBuf,

    /// Number of rows processed concurrently
    #[arg(long, default_value_t = 5)]
    workers: usize,

    /// Maximum crawl depth per site
    #[arg(long, default_value_t = 2)]
    depth: u32,

    /// Maximum pages fetched per site
    #[arg(long = "max-pages", default_value_t = 5)]
    max_pages: u32,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = EngineConfig {
        max_depth: cli.depth,
        max_pages: cli.max_pages,
        timeout: Duration::from_secs(cli.timeout),
        ..Default::default()
    };

    tracing::info!(
        "configuration: {} workers, depth {}, max pages {}, timeout {}s",
        cli.workers,
        config.max_depth,
        config.max_pages,
        cli.timeout
    );

    let engine = Arc::new(DiscoveryEngine::new(config).context("failed to build engine")?);

    let rows = sheet::read_rows(&cli.input, &cli.column)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    // Ctrl-C finishes in-flight rows as exhausted instead of aborting
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, finishing in-flight rows");
            signal_token.cancel();
        }
    });

    let workers = cli.workers.max(1);
    let mut results: Vec<(usize, _)> = stream::iter(rows.into_iter().enumerate())
        .map(|(index, value)| {
            let engine = Arc::clone(&engine);
            let cancel = cancel.clone();
            async move {
                let outcome = engine.discover(&value, &cancel).await;
                tracing::debug!("row {}: {}", index + 1, outcome.status);
                (index, outcome)
            }
        })
        .buffer_unordered(workers)
        .collect()
        .await;

    // Restore input file order before writing
    results.sort_by_key(|(index, _)| *index);

    let result_rows: Vec<ResultRow> = results
        .iter()
        .map(|(index, outcome)| ResultRow::from_outcome(index + 1, outcome))
        .collect();

    sheet::write_results(&cli.output, &result_rows)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    let outcomes: Vec<_> = results.into_iter().map(|(_, outcome)| outcome).collect();
    let stats = report::RunStats::from_outcomes(&outcomes);
    report::print_stats(&stats);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("insta_scout=info,warn"),
            1 => EnvFilter::new("insta_scout=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
