//! Cache keys

use llm_lab_core::{ExperimentId, ResponseId};
use std::fmt;

/// Identity of one cached resource.
///
/// Keys are made of `:`-separated segments (`experiments:7`,
/// `responses:experiment:7`). Prefix invalidation matches whole segments, so
/// `experiments:7` never matches `experiments:70`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The experiment list
    Experiments,
    /// One experiment's detail
    Experiment(ExperimentId),
    /// Every response of an experiment
    ExperimentResponses(ExperimentId),
    /// A single response
    Response(ResponseId),
    /// An experiment's metrics summary
    ExperimentMetrics(ExperimentId),
}

impl QueryKey {
    pub fn segments(&self) -> Vec<String> {
        match self {
            QueryKey::Experiments => vec!["experiments".to_string()],
            QueryKey::Experiment(id) => vec!["experiments".to_string(), id.to_string()],
            QueryKey::ExperimentResponses(id) => vec![
                "responses".to_string(),
                "experiment".to_string(),
                id.to_string(),
            ],
            QueryKey::Response(id) => vec!["response".to_string(), id.to_string()],
            QueryKey::ExperimentMetrics(id) => vec![
                "metrics".to_string(),
                "experiment".to_string(),
                id.to_string(),
            ],
        }
    }

    /// True when `prefix` names this key or one of its leading segment groups.
    /// An empty prefix matches every key.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.trim_matches(':');
        if prefix.is_empty() {
            return true;
        }
        let segments = self.segments();
        let wanted: Vec<&str> = prefix.split(':').collect();
        wanted.len() <= segments.len()
            && wanted.iter().zip(&segments).all(|(w, s)| *w == s.as_str())
    }

    /// Every key that caches data about the given experiment.
    pub fn for_experiment(id: ExperimentId) -> [QueryKey; 3] {
        [
            QueryKey::Experiment(id),
            QueryKey::ExperimentResponses(id),
            QueryKey::ExperimentMetrics(id),
        ]
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments().join(":"))
    }
}
