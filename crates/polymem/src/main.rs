// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! polymem - multi-view memory retrieval from the command line.
//!
//! Every command opens the file-backed views under `storage.data_dir`, runs,
//! and closes them again.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod analytics;
mod ingest;
mod report;
mod search;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use polymem_config::model::PolymemConfig;
use polymem_core::PolymemError;
use polymem_views::ViewCoordinator;
use tracing::debug;

/// polymem - store chunks as vectors, graph facts, and text; query all three at once.
#[derive(Parser, Debug)]
#[command(name = "polymem", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store every chunk from a JSON array file.
    Ingest(IngestArgs),
    /// Query the vector, text, and (optionally) graph views.
    Search(SearchArgs),
    /// Show per-view record counts.
    Stats(StatsArgs),
    /// Health-check every view.
    Health,
    /// Rank graph nodes with PageRank.
    Rank(RankArgs),
    /// List node communities.
    Communities,
    /// Find the cheapest path between two graph nodes.
    Path(PathArgs),
}

#[derive(Args, Debug)]
struct IngestArgs {
    /// JSON file holding an array of chunks.
    file: PathBuf,
}

#[derive(Args, Debug)]
struct SearchArgs {
    query: String,

    /// Results per view (0 = no cap). Defaults to `views.default_max_results`.
    #[arg(long)]
    limit: Option<usize>,

    /// Also match entity names in the graph.
    #[arg(long)]
    graph: bool,

    /// Drop vector and text hits below this score. Defaults to `views.min_score`.
    #[arg(long)]
    min_score: Option<f64>,

    /// Query embedding as a JSON array, e.g. `[0.1, 0.9]`.
    #[arg(long)]
    embedding: Option<String>,

    /// Include highlighted snippets in text hits.
    #[arg(long)]
    highlight: bool,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Print stats as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Number of nodes to show (0 = all).
    #[arg(long, default_value_t = 10)]
    top: usize,
}

#[derive(Args, Debug)]
struct PathArgs {
    from: String,
    to: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => polymem_config::load_and_validate_path(path),
        None => polymem_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            polymem_config::render_errors(&errors);
            std::process::exit(2);
        }
    };

    init_tracing(&config.logging.level);
    polymem_views::recording::register_metrics();

    let use_color = !cli.plain && std::io::stdout().is_terminal();
    if let Err(e) = run(cli.command, &config, use_color).await {
        eprintln!("polymem: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &PolymemConfig, use_color: bool) -> Result<(), PolymemError> {
    let coordinator = ViewCoordinator::from_config(config).await?;
    debug!(data_dir = %config.storage.data_dir, "views opened");

    let outcome = match command {
        Commands::Ingest(args) => ingest::run_ingest(&coordinator, &args.file, use_color).await,
        Commands::Search(args) => search::run_search(&coordinator, config, args, use_color).await,
        Commands::Stats(args) => report::run_stats(&coordinator, args.json, use_color).await,
        Commands::Health => report::run_health(&coordinator, use_color).await,
        Commands::Rank(args) => analytics::run_rank(&coordinator, config, args.top).await,
        Commands::Communities => analytics::run_communities(&coordinator).await,
        Commands::Path(args) => analytics::run_path(&coordinator, &args.from, &args.to).await,
    };

    let closed = coordinator.close().await;
    outcome?;
    closed
}

/// Installs the global fmt subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("polymem={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
