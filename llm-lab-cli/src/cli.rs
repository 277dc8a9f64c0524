//! Command-line argument definitions

use clap::{Parser, Subcommand};

use crate::commands::{
    config::ConfigCommands, experiments::ExperimentsCommands, export::ExportArgs,
    metrics::MetricsCommands, responses::ResponsesCommands,
};
use crate::output::OutputFormat;

/// LLM Lab - explore how sampling parameters shape model responses
#[derive(Debug, Parser)]
#[command(name = "llm-lab", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend origin (the `/api` prefix is added automatically)
    #[arg(long, global = true, env = "LLM_LAB_API_BASE_URL")]
    pub api_url: Option<String>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging, including request and response bodies
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create, browse, compare and delete experiments
    #[command(alias = "exp")]
    Experiments(ExperimentsCommands),

    /// Inspect individual responses
    Responses(ResponsesCommands),

    /// Show metric statistics for an experiment
    Metrics(MetricsCommands),

    /// Download an experiment's results as CSV or JSON
    Export(ExportArgs),

    /// Manage CLI configuration
    Config(ConfigCommands),
}
