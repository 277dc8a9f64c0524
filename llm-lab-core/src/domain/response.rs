use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use super::ids::{ExperimentId, ResponseId};
use crate::quality::has_response_warnings;

/// Name of the weighted aggregate metric computed by the backend.
pub const OVERALL_SCORE: &str = "overall_score";

pub const TRUNCATED_WARNING: &str = "Response was cut off due to token limit";
pub const CORRUPTED_WARNING: &str = "Response may contain corrupted or low-quality content";
pub const GENERIC_WARNING: &str = "Response quality warning";

// ===== Metric values =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricData {
    pub name: String,
    /// Expected in [0, 1]; rendered as a percentage.
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

// ===== Validation metadata =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ValidationMetadata {
    #[serde(default)]
    pub is_valid: bool,
    #[serde(default)]
    pub is_corrupted: bool,
    #[serde(default)]
    pub is_truncated: bool,
    #[serde(default)]
    pub corruption_score: f64,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ValidationMetadata {
    pub fn has_warnings(&self) -> bool {
        self.is_truncated || self.is_corrupted || !self.warnings.is_empty()
    }

    /// Backend warnings followed by one line per raised flag.
    pub fn warning_lines(&self) -> Vec<String> {
        let mut lines = self.warnings.clone();
        if self.is_truncated {
            lines.push(TRUNCATED_WARNING.to_string());
        }
        if self.is_corrupted {
            lines.push(CORRUPTED_WARNING.to_string());
        }
        lines
    }

    /// One-line tooltip text for table rows.
    pub fn warning_summary(&self) -> String {
        if self.warnings.is_empty() {
            GENERIC_WARNING.to_string()
        } else {
            self.warnings.join(", ")
        }
    }
}

// ===== Response =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub id: ResponseId,
    pub experiment_id: ExperimentId,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    pub text: String,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub validation_metadata: Option<ValidationMetadata>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub metrics: Vec<MetricData>,
}

impl Response {
    /// First metric with the given name.
    pub fn metric(&self, name: &str) -> Option<&MetricData> {
        self.metrics.iter().find(|m| m.name == name)
    }

    pub fn metric_value(&self, name: &str) -> Option<f64> {
        self.metric(name).map(|m| m.value)
    }

    pub fn overall_score(&self) -> Option<f64> {
        self.metric_value(OVERALL_SCORE)
    }

    pub fn has_warnings(&self) -> bool {
        has_response_warnings(self.validation_metadata.as_ref())
    }

    /// Numeric value used to order responses; a missing metric counts as 0.
    pub fn sort_value(&self, key: &ResponseSortKey) -> f64 {
        match key {
            ResponseSortKey::Temperature => self.temperature,
            ResponseSortKey::TopP => self.top_p,
            ResponseSortKey::Metric(name) => self.metric_value(name).unwrap_or(0.0),
        }
    }
}

/// Sorted, de-duplicated metric names across `responses`, excluding the overall score.
pub fn metric_columns(responses: &[Response]) -> Vec<String> {
    responses
        .iter()
        .flat_map(|r| r.metrics.iter().map(|m| m.name.as_str()))
        .filter(|name| *name != OVERALL_SCORE)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// ===== Sort keys =====

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResponseSortKey {
    Temperature,
    TopP,
    Metric(String),
}

impl ResponseSortKey {
    pub fn overall() -> Self {
        Self::Metric(OVERALL_SCORE.to_string())
    }
}

impl fmt::Display for ResponseSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::TopP => write!(f, "top_p"),
            Self::Metric(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for ResponseSortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "temperature" => Self::Temperature,
            "top_p" => Self::TopP,
            other => Self::Metric(other.to_string()),
        })
    }
}
