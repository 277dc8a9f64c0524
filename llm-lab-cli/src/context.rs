//! CLI execution context

use anyhow::{Context as _, Result};
use llm_lab_sdk::{LabStore, LlmLabClient, SdkConfig, SyncConfig};
use std::time::Duration;

use crate::cli::Cli;
use crate::config::CliConfig;
use crate::output::OutputWriter;

/// Execution context for CLI commands
pub struct Context {
    /// CLI configuration
    pub config: CliConfig,

    /// Output writer
    pub output: OutputWriter,

    /// Verbose mode
    pub verbose: bool,

    /// API URL override (flag or `LLM_LAB_API_BASE_URL`)
    pub api_url_override: Option<String>,
}

impl Context {
    /// Create a new context from CLI arguments
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = match CliConfig::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring unreadable configuration: {:#}", e);
                CliConfig::default()
            }
        };

        // Flag wins, then the configured default, then table
        let output_format = cli.output.unwrap_or_else(|| {
            config
                .settings
                .output_format
                .parse()
                .unwrap_or_default()
        });
        let no_color = cli.no_color || !config.settings.color;
        let output = OutputWriter::new(output_format, no_color);

        Ok(Self {
            config,
            output,
            verbose: cli.verbose,
            api_url_override: cli.api_url.clone(),
        })
    }

    /// Get the effective API URL
    pub fn api_url(&self) -> &str {
        self.api_url_override
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.config.api_url())
    }

    /// Create an SDK client
    pub fn create_client(&self) -> Result<LlmLabClient> {
        let timeout = Duration::from_secs(self.config.settings.timeout_secs);

        let config = SdkConfig::new(self.api_url())
            .with_timeout(timeout)
            .with_logging(self.verbose);

        LlmLabClient::new(config).context("Failed to create API client")
    }

    /// Create a cached store over a fresh client
    pub fn create_store(&self) -> Result<LabStore> {
        let ttl = Duration::from_secs(self.config.settings.cache_ttl_secs);
        Ok(self.create_client()?.into_store(SyncConfig::default().with_ttl(Some(ttl))))
    }
}
