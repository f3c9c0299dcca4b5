//! Bondweave CLI - Validate board content and explore bond graphs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use bondweave_core::EngineConfig;
use bondweave_store::{Fixture, MemoryArticleStore, TimeoutStore};
use commands::{check, completions, families, graph, validate};

#[derive(Parser)]
#[command(name = "bondweave")]
#[command(author, version, about = "Schema validation and bond-graph engine for boards")]
pub struct Cli {
    /// Board fixture with boards, articles and edges (JSON or TOML)
    #[arg(long, global = true, env = "BONDWEAVE_FIXTURE")]
    pub fixture: Option<PathBuf>,

    /// Engine config file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate form input against a category
    Validate(validate::ValidateArgs),
    /// Check the bonds of stored (typed) content
    Check(check::CheckArgs),
    /// Build the bond graph around an article
    Graph(graph::GraphArgs),
    /// Show the family index of a board
    Families(families::FamiliesArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the loaded store and engine config
pub struct AppContext {
    pub store: Arc<TimeoutStore<MemoryArticleStore>>,
    pub config: EngineConfig,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config = config::load_engine_config(cli.config.as_deref())?;

        let path = cli
            .fixture
            .as_ref()
            .context("no fixture given (use --fixture or BONDWEAVE_FIXTURE)")?;
        tracing::debug!("Using fixture at: {:?}", path);

        let store = Fixture::load(path)
            .and_then(Fixture::into_store)
            .with_context(|| format!("failed to load fixture {}", path.display()))?;

        Ok(Self {
            store: Arc::new(TimeoutStore::new(store, config.store_timeout())),
            config,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting bondweave CLI");

    // Completions need no fixture
    let ctx = match &cli.command {
        Commands::Completions(args) => return completions::run(args),
        _ => AppContext::new(&cli)?,
    };

    match &cli.command {
        Commands::Validate(args) => validate::run(args, &cli, &ctx).await?,
        Commands::Check(args) => check::run(args, &cli, &ctx).await?,
        Commands::Graph(args) => graph::run(args, &cli, &ctx).await?,
        Commands::Families(args) => families::run(args, &cli, &ctx)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
