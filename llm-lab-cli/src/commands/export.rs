//! Export command

use anyhow::{bail, Result};
use clap::Args;
use llm_lab_core::ExperimentId;
use llm_lab_sdk::ExportFormat;
use std::path::PathBuf;

use crate::context::Context;
use crate::output::finish_spinner;

/// Download an experiment's responses and metrics
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Experiment ID
    pub experiment_id: ExperimentId,

    /// File format
    #[arg(short, long, default_value = "csv")]
    pub format: ExportFormat,

    /// Directory the file is written to
    #[arg(short = 'd', long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Execute the export command
pub async fn execute(ctx: &Context, args: ExportArgs) -> Result<()> {
    if !args.experiment_id.is_set() {
        bail!("Experiment ID must be a positive integer");
    }

    let client = ctx.create_client()?;
    let spinner = ctx
        .output
        .spinner(&format!("Exporting experiment {} as {}...", args.experiment_id, args.format));
    let saved = client
        .export()
        .download(args.experiment_id, args.format, &args.output_dir)
        .await;
    finish_spinner(spinner);

    let path = saved?;
    ctx.output.success(&format!("Saved {}", path.display()));
    Ok(())
}
