//! Application-level store tying the resource clients to their caches.

use crate::error::SdkResult;
use crate::LlmLabClient;
use llm_lab_core::{
    Experiment, ExperimentCreate, ExperimentDetail, ExperimentId, MetricsSummary, Response,
    ResponseId,
};
use tracing::info;

use super::cache::{CacheStats, LoadState, QueryCache, SyncConfig};
use super::key::QueryKey;

/// Cached, de-duplicated access to every read the console makes, plus the
/// mutations that invalidate them.
///
/// Per-id reads return `Ok(None)` without a request when the id is unset (0).
#[derive(Debug)]
pub struct LabStore {
    client: LlmLabClient,
    experiments: QueryCache<Vec<Experiment>>,
    experiment: QueryCache<ExperimentDetail>,
    responses: QueryCache<Vec<Response>>,
    response: QueryCache<Response>,
    metrics: QueryCache<MetricsSummary>,
}

impl LabStore {
    pub fn new(client: LlmLabClient, config: SyncConfig) -> Self {
        Self {
            client,
            experiments: QueryCache::new(&config),
            experiment: QueryCache::new(&config),
            responses: QueryCache::new(&config),
            response: QueryCache::new(&config),
            metrics: QueryCache::new(&config),
        }
    }

    pub fn client(&self) -> &LlmLabClient {
        &self.client
    }

    // ===== Reads =====

    pub async fn experiments(&self) -> SdkResult<Vec<Experiment>> {
        let api = self.client.experiments().clone();
        self.experiments
            .get_or_fetch(QueryKey::Experiments, move || async move { api.list().await })
            .await
    }

    /// Bypass the cache and reload the experiment list.
    pub async fn refetch_experiments(&self) -> SdkResult<Vec<Experiment>> {
        let api = self.client.experiments().clone();
        self.experiments
            .refetch(QueryKey::Experiments, move || async move { api.list().await })
            .await
    }

    pub async fn experiment(&self, id: ExperimentId) -> SdkResult<Option<ExperimentDetail>> {
        if !id.is_set() {
            return Ok(None);
        }
        let api = self.client.experiments().clone();
        self.experiment
            .get_or_fetch(QueryKey::Experiment(id), move || async move { api.get(id).await })
            .await
            .map(Some)
    }

    pub async fn responses(&self, experiment_id: ExperimentId) -> SdkResult<Option<Vec<Response>>> {
        if !experiment_id.is_set() {
            return Ok(None);
        }
        let api = self.client.responses().clone();
        self.responses
            .get_or_fetch(QueryKey::ExperimentResponses(experiment_id), move || async move {
                api.get_by_experiment(experiment_id).await
            })
            .await
            .map(Some)
    }

    pub async fn response(&self, id: ResponseId) -> SdkResult<Option<Response>> {
        if !id.is_set() {
            return Ok(None);
        }
        let api = self.client.responses().clone();
        self.response
            .get_or_fetch(QueryKey::Response(id), move || async move { api.get(id).await })
            .await
            .map(Some)
    }

    pub async fn metrics(&self, experiment_id: ExperimentId) -> SdkResult<Option<MetricsSummary>> {
        if !experiment_id.is_set() {
            return Ok(None);
        }
        let api = self.client.metrics().clone();
        self.metrics
            .get_or_fetch(QueryKey::ExperimentMetrics(experiment_id), move || async move {
                api.get_summary(experiment_id).await
            })
            .await
            .map(Some)
    }

    // ===== Mutations =====

    /// Create an experiment and invalidate the list.
    ///
    /// The created experiment is returned so the caller can go straight to its
    /// detail view.
    pub async fn create_experiment(&self, request: &ExperimentCreate) -> SdkResult<Experiment> {
        let created = self.client.experiments().create(request).await?;
        self.experiments.invalidate_key(&QueryKey::Experiments);
        info!(id = %created.id, name = %created.name, "Experiment created");
        Ok(created)
    }

    /// Delete an experiment and invalidate the list plus everything cached for it.
    ///
    /// Single responses are cached by response id only, so all of them are dropped.
    pub async fn delete_experiment(&self, id: ExperimentId) -> SdkResult<()> {
        self.client.experiments().delete(id).await?;
        self.experiments.invalidate_key(&QueryKey::Experiments);
        for key in QueryKey::for_experiment(id) {
            self.invalidate_key(&key);
        }
        self.response.invalidate("response");
        info!(%id, "Experiment deleted");
        Ok(())
    }

    // ===== Cache control =====

    /// Drop every cached key matching `prefix`. Returns the number dropped.
    pub fn invalidate(&self, prefix: &str) -> usize {
        self.experiments.invalidate(prefix)
            + self.experiment.invalidate(prefix)
            + self.responses.invalidate(prefix)
            + self.response.invalidate(prefix)
            + self.metrics.invalidate(prefix)
    }

    /// Drop exactly one key from whichever cache holds it.
    pub fn invalidate_key(&self, key: &QueryKey) -> bool {
        match key {
            QueryKey::Experiments => self.experiments.invalidate_key(key),
            QueryKey::Experiment(_) => self.experiment.invalidate_key(key),
            QueryKey::ExperimentResponses(_) => self.responses.invalidate_key(key),
            QueryKey::Response(_) => self.response.invalidate_key(key),
            QueryKey::ExperimentMetrics(_) => self.metrics.invalidate_key(key),
        }
    }

    pub fn clear(&self) {
        self.experiments.clear();
        self.experiment.clear();
        self.responses.clear();
        self.response.clear();
        self.metrics.clear();
    }

    /// Load state of `key` with the value elided.
    pub fn status(&self, key: &QueryKey) -> LoadState<()> {
        match key {
            QueryKey::Experiments => self.experiments.state(key).map(drop),
            QueryKey::Experiment(_) => self.experiment.state(key).map(drop),
            QueryKey::ExperimentResponses(_) => self.responses.state(key).map(drop),
            QueryKey::Response(_) => self.response.state(key).map(drop),
            QueryKey::ExperimentMetrics(_) => self.metrics.state(key).map(drop),
        }
    }

    pub fn experiments_state(&self) -> LoadState<Vec<Experiment>> {
        self.experiments.state(&QueryKey::Experiments)
    }

    pub fn stats(&self) -> CacheStats {
        self.experiments.stats()
            + self.experiment.stats()
            + self.responses.stats()
            + self.response.stats()
            + self.metrics.stats()
    }
}
