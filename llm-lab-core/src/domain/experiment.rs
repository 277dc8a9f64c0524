use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use super::ids::ExperimentId;
use crate::format::format_date;
use crate::params::{ParameterKind, ParameterRange, MAX_TOKENS_DEFAULT};

// ===== Experiment =====

/// An experiment as listed by the backend. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experiment {
    pub id: ExperimentId,
    pub name: String,
    pub prompt: String,
    /// ISO timestamp as sent by the backend; may be empty.
    #[serde(default)]
    pub created_at: String,
}

impl Experiment {
    pub fn created_display(&self) -> String {
        format_date(&self.created_at)
    }

    /// First `max_chars` characters of the prompt on a single line.
    pub fn prompt_preview(&self, max_chars: usize) -> String {
        let flat: String = self
            .prompt
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect();
        if flat.chars().count() <= max_chars {
            flat
        } else {
            let cut: String = flat.chars().take(max_chars).collect();
            format!("{}...", cut.trim_end())
        }
    }
}

/// Experiment plus its server-computed response count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperimentDetail {
    #[serde(flatten)]
    pub experiment: Experiment,
    #[serde(default)]
    pub response_count: u64,
}

impl ExperimentDetail {
    pub fn id(&self) -> ExperimentId {
        self.experiment.id
    }

    pub fn name(&self) -> &str {
        &self.experiment.name
    }

    pub fn prompt(&self) -> &str {
        &self.experiment.prompt
    }
}

// ===== Creation payload =====

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct ExperimentCreate {
    #[validate(
        length(max = 255, message = "Experiment name must be at most 255 characters"),
        custom(function = "validate_not_blank", message = "Experiment name is required")
    )]
    pub name: String,

    #[validate(custom(function = "validate_not_blank", message = "Prompt is required"))]
    pub prompt: String,

    #[validate(
        length(min = 1, message = "At least one temperature value is required"),
        custom(function = "validate_temperature_values")
    )]
    pub temperature_range: Vec<f64>,

    #[validate(
        length(min = 1, message = "At least one top_p value is required"),
        custom(function = "validate_top_p_values")
    )]
    pub top_p_range: Vec<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 4000, message = "Max tokens must be between 1 and 4000"))]
    pub max_tokens: Option<u32>,
}

impl ExperimentCreate {
    /// A payload seeded with the default parameter grids and token cap.
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            temperature_range: ParameterKind::Temperature.default_values().to_vec(),
            top_p_range: ParameterKind::TopP.default_values().to_vec(),
            max_tokens: Some(MAX_TOKENS_DEFAULT),
        }
    }

    /// Build the payload from two form ranges.
    pub fn from_ranges(
        name: impl Into<String>,
        prompt: impl Into<String>,
        temperatures: &ParameterRange,
        top_ps: &ParameterRange,
        max_tokens: Option<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            temperature_range: temperatures.values().to_vec(),
            top_p_range: top_ps.values().to_vec(),
            max_tokens,
        }
    }

    pub fn with_temperatures(mut self, values: Vec<f64>) -> Self {
        self.temperature_range = values;
        self
    }

    pub fn with_top_p_values(mut self, values: Vec<f64>) -> Self {
        self.top_p_range = values;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Number of generations the backend will run for this payload.
    pub fn combination_count(&self) -> usize {
        self.temperature_range.len() * self.top_p_range.len()
    }

    /// Run every submission check; the payload must pass before it is sent.
    pub fn check(&self) -> crate::Result<()> {
        self.validate()?;
        Ok(())
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[allow(clippy::ptr_arg)]
fn validate_temperature_values(values: &Vec<f64>) -> Result<(), ValidationError> {
    validate_values(ParameterKind::Temperature, values)
}

#[allow(clippy::ptr_arg)]
fn validate_top_p_values(values: &Vec<f64>) -> Result<(), ValidationError> {
    validate_values(ParameterKind::TopP, values)
}

fn validate_values(kind: ParameterKind, values: &[f64]) -> Result<(), ValidationError> {
    if let Some(bad) = values.iter().find(|v| !kind.contains(**v)) {
        let mut err = ValidationError::new("out_of_range");
        err.message = Some(Cow::Owned(format!("{} (got {})", kind.range_message(), bad)));
        return Err(err);
    }
    Ok(())
}
