//! Metrics resource client

use crate::client::HttpClient;
use crate::error::SdkResult;
use llm_lab_core::{ExperimentId, MetricsSummary};
use std::sync::Arc;

/// Client for per-experiment metric aggregates
#[derive(Debug, Clone)]
pub struct MetricsClient {
    client: Arc<HttpClient>,
}

impl MetricsClient {
    /// Create a new metrics client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Aggregate statistics for every metric of an experiment
    pub async fn get_summary(&self, experiment_id: ExperimentId) -> SdkResult<MetricsSummary> {
        self.client
            .get(&format!("/metrics/experiment/{}/summary", experiment_id))
            .await
    }
}
