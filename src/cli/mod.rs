//! Command-line interface.

pub mod commands;
pub mod formatters;
pub mod output;

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub use commands::Commands;
pub use output::OutputFormat;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "portq",
    version,
    about = "Query a ports catalog with a compact boolean search language",
    long_about = "portq fetches a site's ports.json index once, then filters it \
                  client-side with field-scoped predicates (name:, category:, ...), \
                  boolean operators (&&, ||, !), and relative-time filters \
                  (is:new, since:2w)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a config file (replaces the global/project layers)
    #[arg(long, global = true, env = "PORTQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Index URL override (otherwise from config)
    #[arg(long, global = true)]
    pub index_url: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress logging entirely
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Machine-readable output: JSON results and JSON errors
    #[arg(long, global = true)]
    pub robot: bool,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
}

impl Cli {
    /// Effective output format: `--robot` forces JSON, `--format` wins
    /// otherwise, then the config default.
    pub fn output_format(&self, config: &Config) -> OutputFormat {
        if self.robot {
            return OutputFormat::Json;
        }
        if let Some(format) = self.format {
            return format;
        }
        OutputFormat::from_config(&config.output.format)
    }
}
