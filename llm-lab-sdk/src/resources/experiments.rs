//! Experiments resource client
//!
//! This module provides methods for managing experiments.

use crate::client::HttpClient;
use crate::error::SdkResult;
use llm_lab_core::{Experiment, ExperimentCreate, ExperimentDetail, ExperimentId};
use std::sync::Arc;
use tracing::debug;

/// Client for experiment operations
#[derive(Debug, Clone)]
pub struct ExperimentsClient {
    client: Arc<HttpClient>,
}

impl ExperimentsClient {
    /// Create a new experiments client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Create a new experiment
    ///
    /// The payload is validated first; an invalid payload never reaches the network.
    pub async fn create(&self, request: &ExperimentCreate) -> SdkResult<Experiment> {
        request.check()?;
        debug!(
            name = %request.name,
            combinations = request.combination_count(),
            "Creating experiment"
        );
        self.client.post("/experiments/", request).await
    }

    /// List all experiments
    pub async fn list(&self) -> SdkResult<Vec<Experiment>> {
        self.client.get("/experiments/").await
    }

    /// Get an experiment by ID
    pub async fn get(&self, id: ExperimentId) -> SdkResult<ExperimentDetail> {
        self.client.get(&format!("/experiments/{}", id)).await
    }

    /// Delete an experiment
    pub async fn delete(&self, id: ExperimentId) -> SdkResult<()> {
        self.client.delete(&format!("/experiments/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SdkConfig;
    use crate::error::SdkError;

    #[tokio::test]
    async fn test_invalid_payload_is_rejected_locally() {
        // Nothing listens on port 9; a request would surface as a network error.
        let http = Arc::new(HttpClient::new(SdkConfig::new("http://127.0.0.1:9")).unwrap());
        let client = ExperimentsClient::new(http);

        let request = ExperimentCreate::new("Sweep", "Say hi").with_temperatures(vec![2.5]);
        let err = client.create(&request).await.unwrap_err();

        assert!(matches!(err, SdkError::Validation(_)));
        assert!(err.to_string().contains("temperature_range"));
    }
}
