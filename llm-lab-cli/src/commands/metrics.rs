//! Metrics commands

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use llm_lab_core::ExperimentId;

use crate::context::Context;
use crate::output::finish_spinner;
use crate::views::print_metrics_table;

/// Metric statistics commands
#[derive(Debug, Args)]
pub struct MetricsCommands {
    #[command(subcommand)]
    pub command: MetricsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum MetricsSubcommand {
    /// Mean, median, min, max and standard deviation of every metric
    Summary {
        /// Experiment ID
        experiment_id: ExperimentId,
    },
}

/// Execute metrics commands
pub async fn execute(ctx: &Context, cmd: MetricsCommands) -> Result<()> {
    match cmd.command {
        MetricsSubcommand::Summary { experiment_id } => summary(ctx, experiment_id).await,
    }
}

async fn summary(ctx: &Context, experiment_id: ExperimentId) -> Result<()> {
    if !experiment_id.is_set() {
        bail!("Experiment ID must be a positive integer");
    }

    let store = ctx.create_store()?;
    let spinner = ctx.output.spinner("Fetching metrics...");
    let summary = store.metrics(experiment_id).await;
    finish_spinner(spinner);

    let summary = summary?.unwrap_or_default();
    if ctx.output.is_table() {
        print_metrics_table(&summary);
    } else {
        ctx.output.write_data(&summary)?;
    }

    Ok(())
}
