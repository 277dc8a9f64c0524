//! Responses resource client

use crate::client::HttpClient;
use crate::error::SdkResult;
use llm_lab_core::{ExperimentId, Response, ResponseId};
use std::sync::Arc;

/// Client for generated-response lookups
#[derive(Debug, Clone)]
pub struct ResponsesClient {
    client: Arc<HttpClient>,
}

impl ResponsesClient {
    /// Create a new responses client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// All responses generated for an experiment
    pub async fn get_by_experiment(&self, experiment_id: ExperimentId) -> SdkResult<Vec<Response>> {
        self.client
            .get(&format!("/responses/experiment/{}", experiment_id))
            .await
    }

    /// A single response with its metrics
    pub async fn get(&self, id: ResponseId) -> SdkResult<Response> {
        self.client.get(&format!("/responses/{}", id)).await
    }
}
