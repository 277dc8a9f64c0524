use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::ResponseId;

/// One response's contribution to a metric aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricResponseData {
    pub response_id: ResponseId,
    pub temperature: f64,
    pub top_p: f64,
    pub value: f64,
}

/// Aggregate statistics for a single metric across an experiment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSummary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub count: u64,
    #[serde(default)]
    pub responses: Vec<MetricResponseData>,
}

impl MetricSummary {
    /// Highest-valued contribution; the first one wins on ties.
    pub fn best(&self) -> Option<&MetricResponseData> {
        self.responses.iter().fold(None, |best, candidate| match best {
            Some(current) if current.value >= candidate.value => Some(current),
            _ => Some(candidate),
        })
    }
}

/// Metric name to aggregate, ordered by name. Derived server-side and read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct MetricsSummary(pub BTreeMap<String, MetricSummary>);

impl MetricsSummary {
    pub fn get(&self, name: &str) -> Option<&MetricSummary> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetricSummary)> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contribution(id: i64, value: f64) -> MetricResponseData {
        MetricResponseData {
            response_id: ResponseId(id),
            temperature: 1.0,
            top_p: 0.9,
            value,
        }
    }

    #[test]
    fn test_best_prefers_first_on_ties() {
        let summary = MetricSummary {
            mean: 0.5,
            median: 0.5,
            min: 0.2,
            max: 0.8,
            std_dev: 0.1,
            count: 3,
            responses: vec![contribution(1, 0.2), contribution(2, 0.8), contribution(3, 0.8)],
        };
        assert_eq!(summary.best().map(|b| b.response_id), Some(ResponseId(2)));
    }

    #[test]
    fn test_best_of_empty_is_none() {
        let summary = MetricSummary {
            mean: 0.0,
            median: 0.0,
            min: 0.0,
            max: 0.0,
            std_dev: 0.0,
            count: 0,
            responses: vec![],
        };
        assert!(summary.best().is_none());
    }

    #[test]
    fn test_summary_deserializes_from_plain_map() {
        let json = r#"{
            "overall_score": {"mean": 0.6, "median": 0.6, "min": 0.4, "max": 0.8,
                "std_dev": 0.2, "count": 2,
                "responses": [{"response_id": 1, "temperature": 0.5, "top_p": 0.9, "value": 0.4}]}
        }"#;
        let summary: MetricsSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.names().collect::<Vec<_>>(), vec!["overall_score"]);
        assert_eq!(summary.get("overall_score").unwrap().count, 2);
    }
}
