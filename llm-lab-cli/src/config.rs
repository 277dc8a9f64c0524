//! CLI configuration management

use anyhow::{Context as _, Result};
use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default API URL
pub const DEFAULT_API_URL: &str = llm_lab_sdk::config::DEFAULT_BASE_URL;

/// Overrides the directory holding `config.toml`.
pub const CONFIG_DIR_ENV: &str = "LLM_LAB_CONFIG_DIR";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CliConfig {
    /// Backend origin; the `/api` prefix is added by the SDK
    #[serde(default)]
    pub api_url: Option<String>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

impl CliConfig {
    /// Load configuration from the config file, then `LLM_LAB__*` environment overrides
    /// (e.g. `LLM_LAB__SETTINGS__TIMEOUT_SECS=60`).
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let settings = Config::builder()
            .add_source(
                File::from(path.clone())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("LLM_LAB")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir).join("config.toml"));
        }
        let dirs = ProjectDirs::from("com", "llm-lab", "llm-lab-cli")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the API URL, falling back to default
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

/// Global settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Default output format
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Seconds a fetched resource is reused within one invocation
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            color: true,
            timeout_secs: default_timeout(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_output_format() -> String {
    "table".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_cache_ttl() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.api_url.is_none());
        assert_eq!(config.api_url(), "http://localhost:8000");
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output_format, "table");
        assert!(settings.color);
        assert_eq!(settings.timeout_secs, 30);
        assert_eq!(settings.cache_ttl_secs, 300);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            api_url = "http://lab.internal:8000"

            [settings]
            color = false
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url(), "http://lab.internal:8000");
        assert!(!config.settings.color);
        assert_eq!(config.settings.timeout_secs, 30);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CliConfig {
            api_url: Some("http://example.test".to_string()),
            settings: Settings {
                output_format: "json".to_string(),
                ..Settings::default()
            },
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<CliConfig>(&text).unwrap(), config);
    }
}
