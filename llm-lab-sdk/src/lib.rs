//! LLM Lab SDK
//!
//! This crate provides a Rust client for the LLM Lab parameter-experimentation
//! API. It covers experiments, generated responses, metric summaries, and
//! exports, plus a caching synchronization layer for interactive front ends.
//!
//! # Features
//!
//! - **Typed resource clients**: request and response models from `llm-lab-core`
//! - **Normalized errors**: every failure surfaces a single user-facing message
//! - **Client-side validation**: invalid experiment payloads never leave the process
//! - **Query cache**: de-duplicated reads with key-based invalidation after mutations
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use llm_lab_sdk::{LlmLabClient, SdkConfig};
//! use llm_lab_core::ExperimentCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LlmLabClient::new(SdkConfig::from_env())?;
//!
//!     let experiments = client.experiments().list().await?;
//!     println!("Found {} experiments", experiments.len());
//!
//!     let request = ExperimentCreate::new("Creativity sweep", "Write a haiku about rust")
//!         .with_temperatures(vec![0.2, 0.7, 1.2]);
//!     let created = client.experiments().create(&request).await?;
//!     println!("Created experiment {}", created.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Every [`SdkError`] displays as the message a user should see:
//!
//! ```rust,no_run
//! use llm_lab_sdk::{LlmLabClient, SdkError};
//! use llm_lab_core::ExperimentId;
//!
//! async fn show(client: &LlmLabClient, id: ExperimentId) {
//!     match client.experiments().get(id).await {
//!         Ok(detail) => println!("{} ({} responses)", detail.name(), detail.response_count),
//!         Err(e) if e.is_not_found() => eprintln!("No such experiment: {}", e),
//!         Err(e @ SdkError::Network { .. }) => eprintln!("{}", e),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod sync;

// Re-export main types for convenience
pub use client::HttpClient;
pub use config::SdkConfig;
pub use error::{SdkError, SdkResult, GENERIC_API_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};

// Re-export resource clients
pub use resources::{
    ExperimentsClient, ExportClient, ExportFile, ExportFormat, MetricsClient, ResponsesClient,
};
pub use sync::{CacheStats, LabStore, LoadState, QueryCache, QueryKey, SyncConfig};

use std::sync::Arc;

/// The main client for the LLM Lab API.
///
/// This client provides access to all API resources through dedicated sub-clients
/// sharing one connection pool. Cloning it is cheap.
///
/// # Example
///
/// ```rust,no_run
/// use llm_lab_sdk::{LlmLabClient, SdkConfig};
/// use std::time::Duration;
///
/// let config = SdkConfig::new("http://localhost:8000")
///     .with_timeout(Duration::from_secs(10));
/// let client = LlmLabClient::new(config)?;
///
/// let experiments = client.experiments();
/// let responses = client.responses();
/// let metrics = client.metrics();
/// let export = client.export();
/// # Ok::<(), llm_lab_sdk::SdkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LlmLabClient {
    http_client: Arc<HttpClient>,
    experiments: ExperimentsClient,
    responses: ResponsesClient,
    metrics: MetricsClient,
    export: ExportClient,
}

impl LlmLabClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails if the configuration is invalid (empty or malformed base URL, zero timeout).
    pub fn new(config: SdkConfig) -> SdkResult<Self> {
        let http_client = Arc::new(HttpClient::new(config)?);

        Ok(Self {
            experiments: ExperimentsClient::new(Arc::clone(&http_client)),
            responses: ResponsesClient::new(Arc::clone(&http_client)),
            metrics: MetricsClient::new(Arc::clone(&http_client)),
            export: ExportClient::new(Arc::clone(&http_client)),
            http_client,
        })
    }

    /// Get the experiments client.
    pub fn experiments(&self) -> &ExperimentsClient {
        &self.experiments
    }

    /// Get the responses client.
    pub fn responses(&self) -> &ResponsesClient {
        &self.responses
    }

    /// Get the metrics client.
    pub fn metrics(&self) -> &MetricsClient {
        &self.metrics
    }

    /// Get the export client.
    pub fn export(&self) -> &ExportClient {
        &self.export
    }

    /// Get a reference to the underlying HTTP client.
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Get the base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.http_client.config().base_url
    }

    /// Wrap this client in a [`LabStore`] with the given cache settings.
    pub fn into_store(self, config: SyncConfig) -> LabStore {
        LabStore::new(self, config)
    }
}
