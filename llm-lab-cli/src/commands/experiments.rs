//! Experiments commands

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use llm_lab_core::{
    ExperimentCreate, ExperimentId, ParameterKind, ParameterRange, ResponseSortKey, SortState,
};
use llm_lab_sdk::LabStore;
use std::io::IsTerminal;

use crate::context::Context;
use crate::output::{finish_spinner, format_param};
use crate::views::{ExperimentRow, ExperimentView};

/// Experiment management commands
#[derive(Debug, Args)]
pub struct ExperimentsCommands {
    #[command(subcommand)]
    pub command: ExperimentsSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ExperimentsSubcommand {
    /// List experiments
    List,

    /// Show an experiment with its metric statistics and response comparison
    Get {
        /// Experiment ID
        id: ExperimentId,

        /// Sort responses by `temperature`, `top_p` or a metric name.
        /// Repeating the same key flips the direction.
        #[arg(short, long = "sort", value_name = "KEY")]
        sort: Vec<String>,
    },

    /// Create a new experiment and run every parameter combination
    Create {
        /// Experiment name (prompted for when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Prompt sent to the model (prompted for when omitted)
        #[arg(short, long)]
        prompt: Option<String>,

        /// Temperature values, repeated or comma-separated (default: 0.5,1.0,1.5)
        #[arg(short, long = "temperature", value_delimiter = ',', allow_hyphen_values = true)]
        temperature: Vec<String>,

        /// Top P values, repeated or comma-separated (default: 0.8,0.9,1.0)
        #[arg(long = "top-p", value_delimiter = ',', allow_hyphen_values = true)]
        top_p: Vec<String>,

        /// Maximum tokens per response
        #[arg(short, long, default_value_t = llm_lab_core::params::MAX_TOKENS_DEFAULT)]
        max_tokens: u32,
    },

    /// Delete an experiment and all of its responses
    Delete {
        /// Experiment ID
        id: ExperimentId,

        /// Force deletion without confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Execute experiment commands
pub async fn execute(ctx: &Context, cmd: ExperimentsCommands) -> Result<()> {
    match cmd.command {
        ExperimentsSubcommand::List => list(ctx).await,
        ExperimentsSubcommand::Get { id, sort } => get(ctx, id, &sort).await,
        ExperimentsSubcommand::Create {
            name,
            prompt,
            temperature,
            top_p,
            max_tokens,
        } => create(ctx, name, prompt, &temperature, &top_p, max_tokens).await,
        ExperimentsSubcommand::Delete { id, force } => delete(ctx, id, force).await,
    }
}

async fn list(ctx: &Context) -> Result<()> {
    let store = ctx.create_store()?;

    let spinner = ctx.output.spinner("Fetching experiments...");
    let experiments = store.experiments().await;
    finish_spinner(spinner);

    let rows: Vec<ExperimentRow> = experiments?.into_iter().map(ExperimentRow).collect();
    ctx.output.write_list(&rows, &["ID", "Name", "Prompt", "Created"])?;

    Ok(())
}

/// Fold repeated `--sort` keys through the header-click toggle.
pub fn sort_state(keys: &[String]) -> SortState<ResponseSortKey> {
    let mut state = SortState::new();
    for key in keys {
        let key: ResponseSortKey = key.parse().unwrap_or_else(|never| match never {});
        state.handle_sort(key);
    }
    state
}

async fn get(ctx: &Context, id: ExperimentId, sort: &[String]) -> Result<()> {
    let store = ctx.create_store()?;
    show_experiment(ctx, &store, id, &sort_state(sort)).await
}

async fn show_experiment(
    ctx: &Context,
    store: &LabStore,
    id: ExperimentId,
    sort: &SortState<ResponseSortKey>,
) -> Result<()> {
    if !id.is_set() {
        bail!("Experiment ID must be a positive integer");
    }

    let spinner = ctx.output.spinner("Loading experiment...");
    let (detail, metrics, responses) =
        tokio::join!(store.experiment(id), store.metrics(id), store.responses(id));
    finish_spinner(spinner);

    let detail = detail?.context("Experiment not found")?;
    let metrics = metrics?.unwrap_or_default();
    let responses = responses?.unwrap_or_default();

    let view = ExperimentView::new(&detail, &metrics, &responses, sort);
    if ctx.output.is_table() {
        view.print(sort);
    } else {
        ctx.output.write_data(&view)?;
    }

    Ok(())
}

/// Run raw inputs through the same checks as the creation form.
pub fn parse_range(kind: ParameterKind, inputs: &[String]) -> Result<ParameterRange> {
    if inputs.is_empty() {
        return Ok(ParameterRange::with_defaults(kind));
    }

    let mut range = ParameterRange::new(kind);
    for input in inputs {
        range
            .add_input(input)
            .with_context(|| format!("Invalid {} value '{}'", kind.label(), input))?;
    }
    Ok(range)
}

fn required_text(value: Option<String>, label: &str, flag: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    if !std::io::stdin().is_terminal() {
        bail!("{} is required (pass {})", label, flag);
    }
    dialoguer::Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .with_context(|| format!("Failed to read {}", label.to_lowercase()))
}

async fn create(
    ctx: &Context,
    name: Option<String>,
    prompt: Option<String>,
    temperatures: &[String],
    top_ps: &[String],
    max_tokens: u32,
) -> Result<()> {
    let temperatures = parse_range(ParameterKind::Temperature, temperatures)?;
    let top_ps = parse_range(ParameterKind::TopP, top_ps)?;

    let name = required_text(name, "Experiment name", "--name")?;
    let prompt = required_text(prompt, "Prompt", "--prompt")?;

    let request = ExperimentCreate::from_ranges(name, prompt, &temperatures, &top_ps, Some(max_tokens));
    request.check()?;

    let values = |range: &ParameterRange| {
        range
            .values()
            .iter()
            .map(|v| format_param(*v))
            .collect::<Vec<_>>()
            .join(", ")
    };
    tracing::debug!(
        temperatures = %values(&temperatures),
        top_p = %values(&top_ps),
        "Submitting experiment"
    );

    let store = ctx.create_store()?;
    let spinner = ctx.output.spinner(&format!(
        "Creating experiment ({} responses to generate)...",
        request.combination_count()
    ));
    let created = store.create_experiment(&request).await;
    finish_spinner(spinner);
    let created = created?;

    ctx.output.success(&format!("Created experiment {}: {}", created.id, created.name));

    show_experiment(ctx, &store, created.id, &SortState::new()).await
}

async fn delete(ctx: &Context, id: ExperimentId, force: bool) -> Result<()> {
    if !force {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete experiment {}? This will also delete all associated responses.",
                id
            ))
            .default(false)
            .interact()
            .context("Failed to get confirmation (pass --force to skip it)")?;

        if !confirm {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    let store = ctx.create_store()?;
    let spinner = ctx.output.spinner("Deleting experiment...");
    let result = store.delete_experiment(id).await;
    finish_spinner(spinner);
    result?;

    ctx.output.success(&format!("Deleted experiment {}", id));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_lab_core::SortDirection;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_range_defaults_when_empty() {
        let range = parse_range(ParameterKind::Temperature, &[]).unwrap();
        assert_eq!(range.values(), &[0.5, 1.0, 1.5]);
    }

    #[test]
    fn test_parse_range_sorts_values() {
        let range = parse_range(ParameterKind::TopP, &strings(&["1.0", " 0.85"])).unwrap();
        assert_eq!(range.values(), &[0.85, 1.0]);
    }

    #[test]
    fn test_parse_range_reports_first_bad_value() {
        let err = parse_range(ParameterKind::Temperature, &strings(&["0.5", "2.5"])).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("'2.5'"));
        assert!(message.contains("Temperature must be between 0.0 and 2.0"));

        let err = parse_range(ParameterKind::TopP, &strings(&["abc"])).unwrap_err();
        assert!(format!("{:#}", err).contains("Please enter a valid number"));

        let err = parse_range(ParameterKind::TopP, &strings(&["0.9", "0.9"])).unwrap_err();
        assert!(format!("{:#}", err).contains("This value is already added"));
    }

    #[test]
    fn test_sort_state_toggles_on_repeat() {
        let state = sort_state(&strings(&["temperature", "temperature"]));
        let config = state.config().unwrap();
        assert_eq!(config.key, ResponseSortKey::Temperature);
        assert_eq!(config.direction, SortDirection::Desc);

        let state = sort_state(&strings(&["temperature", "coherence_score"]));
        let config = state.config().unwrap();
        assert_eq!(config.key, ResponseSortKey::Metric("coherence_score".to_string()));
        assert_eq!(config.direction, SortDirection::Asc);

        assert!(sort_state(&[]).config().is_none());
    }
}
