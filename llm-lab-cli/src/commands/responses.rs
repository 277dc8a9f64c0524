//! Response commands

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use llm_lab_core::ResponseId;

use crate::context::Context;
use crate::output::finish_spinner;
use crate::views::ResponseView;

/// Response inspection commands
#[derive(Debug, Args)]
pub struct ResponsesCommands {
    #[command(subcommand)]
    pub command: ResponsesSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ResponsesSubcommand {
    /// Show a response with its quality warnings and metric scores
    Get {
        /// Response ID
        id: ResponseId,
    },
}

/// Execute response commands
pub async fn execute(ctx: &Context, cmd: ResponsesCommands) -> Result<()> {
    match cmd.command {
        ResponsesSubcommand::Get { id } => get(ctx, id).await,
    }
}

async fn get(ctx: &Context, id: ResponseId) -> Result<()> {
    if !id.is_set() {
        bail!("Response ID must be a positive integer");
    }

    let store = ctx.create_store()?;
    let spinner = ctx.output.spinner("Fetching response...");
    let response = store.response(id).await;
    finish_spinner(spinner);

    let response = response?.context("Response not found")?;
    if ctx.output.is_table() {
        ResponseView(&response).print();
    } else {
        ctx.output.write_data(&response)?;
    }

    Ok(())
}
