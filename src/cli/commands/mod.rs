//! CLI command implementations.
//!
//! Each subcommand has its own module with an Args struct and a run()
//! function.

use clap::Subcommand;

pub mod completions;
pub mod live;
pub mod search;
pub mod stats;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one query against the ports index
    Search(search::SearchArgs),

    /// Interactive search: reads input lines, debounced like the page
    Live(live::LiveArgs),

    /// Catalog summary figures (totals, health, builds)
    Stats(stats::StatsArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

pub async fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args).await,
        Commands::Live(args) => live::run(ctx, args).await,
        Commands::Stats(args) => stats::run(ctx, args).await,
        Commands::Completions(args) => completions::run(args),
    }
}
