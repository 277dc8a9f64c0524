//! Configuration commands

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use url::Url;

use crate::config::CliConfig;
use crate::context::Context;
use crate::output::OutputFormat;

/// Configuration management commands
#[derive(Debug, Args)]
pub struct ConfigCommands {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration
    Show,

    /// Set the backend URL used when no --api-url is given
    SetUrl {
        /// Backend origin, e.g. http://localhost:8000
        url: String,
    },

    /// Set a setting (output_format, color, timeout_secs, cache_ttl_secs)
    Set {
        /// Setting name
        key: String,

        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,

    /// Reset configuration to defaults
    Reset {
        /// Force reset without confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Execute configuration commands
pub async fn execute(ctx: &Context, cmd: ConfigCommands) -> Result<()> {
    match cmd.command {
        ConfigSubcommand::Show => show(ctx),
        ConfigSubcommand::SetUrl { url } => set_url(ctx, &url),
        ConfigSubcommand::Set { key, value } => set(ctx, &key, &value),
        ConfigSubcommand::Path => show_path(),
        ConfigSubcommand::Reset { force } => reset(ctx, force),
    }
}

fn show(ctx: &Context) -> Result<()> {
    if !ctx.output.is_table() {
        return ctx.output.write_data(&ctx.config);
    }

    println!("{}", "Configuration".bold().underline());
    println!();
    println!("{}: {}", "api_url".cyan(), ctx.config.api_url());
    if ctx.api_url_override.is_some() {
        println!("  {} {}", "overridden by:".dimmed(), ctx.api_url());
    }

    println!();
    println!("{}", "Settings:".cyan());
    println!("  output_format: {}", ctx.config.settings.output_format);
    println!("  color: {}", ctx.config.settings.color);
    println!("  timeout_secs: {}", ctx.config.settings.timeout_secs);
    println!("  cache_ttl_secs: {}", ctx.config.settings.cache_ttl_secs);

    Ok(())
}

/// Accept only absolute http(s) origins.
pub fn normalize_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).with_context(|| format!("Invalid URL: {}", raw))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("URL must start with http:// or https:// (got {})", raw);
    }
    Ok(trimmed.to_string())
}

fn set_url(ctx: &Context, url: &str) -> Result<()> {
    let url = normalize_url(url)?;
    let mut config = ctx.config.clone();
    config.api_url = Some(url.clone());
    config.save().context("Failed to save configuration")?;

    ctx.output.success(&format!("API URL set to {}", url));
    Ok(())
}

fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut config = ctx.config.clone();

    match key {
        "output_format" => {
            let format: OutputFormat = value
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("Invalid output format")?;
            config.settings.output_format = format.to_string();
        }
        "color" => config.settings.color = value.parse().context("Invalid boolean value")?,
        "timeout_secs" => {
            let secs: u64 = value.parse().context("Invalid number")?;
            if secs == 0 {
                bail!("timeout_secs must be greater than 0");
            }
            config.settings.timeout_secs = secs;
        }
        "cache_ttl_secs" => config.settings.cache_ttl_secs = value.parse().context("Invalid number")?,
        _ => bail!("Unknown setting: {}", key),
    }

    config.save().context("Failed to save configuration")?;
    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn show_path() -> Result<()> {
    let path = CliConfig::config_path()?;
    let status = if path.exists() { "✓".green() } else { "✗".red() };
    println!("{} {}", status, path.display());
    Ok(())
}

fn reset(ctx: &Context, force: bool) -> Result<()> {
    if !force {
        let confirm = dialoguer::Confirm::new()
            .with_prompt("Reset all configuration to defaults? This cannot be undone.")
            .default(false)
            .interact()
            .context("Failed to get confirmation")?;

        if !confirm {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    CliConfig::default()
        .save()
        .context("Failed to save configuration")?;

    ctx.output.success("Configuration reset to defaults");
    Ok(())
}
