//! Sampling-parameter constraints and the editable value lists of the creation form.
//!
//! Values are checked one at a time as they are added, so a [`ParameterRange`]
//! never holds an out-of-range or duplicate value.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const TEMPERATURE_MIN: f64 = 0.0;
pub const TEMPERATURE_MAX: f64 = 2.0;
pub const TEMPERATURE_STEP: f64 = 0.1;
pub const TEMPERATURE_DEFAULTS: [f64; 3] = [0.5, 1.0, 1.5];

pub const TOP_P_MIN: f64 = 0.0;
pub const TOP_P_MAX: f64 = 1.0;
pub const TOP_P_STEP: f64 = 0.05;
pub const TOP_P_DEFAULTS: [f64; 3] = [0.8, 0.9, 1.0];

pub const MAX_TOKENS_MIN: u32 = 1;
pub const MAX_TOKENS_MAX: u32 = 4000;
pub const MAX_TOKENS_DEFAULT: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Temperature,
    TopP,
}

impl ParameterKind {
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Self::Temperature => (TEMPERATURE_MIN, TEMPERATURE_MAX),
            Self::TopP => (TOP_P_MIN, TOP_P_MAX),
        }
    }

    pub fn step(&self) -> f64 {
        match self {
            Self::Temperature => TEMPERATURE_STEP,
            Self::TopP => TOP_P_STEP,
        }
    }

    pub fn default_values(&self) -> &'static [f64] {
        match self {
            Self::Temperature => &TEMPERATURE_DEFAULTS,
            Self::TopP => &TOP_P_DEFAULTS,
        }
    }

    /// Inclusive range check. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        let (min, max) = self.bounds();
        value >= min && value <= max
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::TopP => "Top P",
        }
    }

    pub fn range_message(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature must be between 0.0 and 2.0",
            Self::TopP => "Top P must be between 0.0 and 1.0",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::TopP => write!(f, "top_p"),
        }
    }
}

/// Why a single value could not be added to a [`ParameterRange`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Please enter a value")]
    Empty,

    #[error("Please enter a valid number")]
    NotANumber(String),

    #[error("{}", .kind.range_message())]
    OutOfRange { kind: ParameterKind, value: f64 },

    #[error("This value is already added")]
    Duplicate { kind: ParameterKind, value: f64 },
}

/// Ordered, duplicate-free list of values for one sampling parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRange {
    kind: ParameterKind,
    values: Vec<f64>,
}

impl ParameterRange {
    pub fn new(kind: ParameterKind) -> Self {
        Self {
            kind,
            values: Vec::new(),
        }
    }

    pub fn with_defaults(kind: ParameterKind) -> Self {
        Self {
            kind,
            values: kind.default_values().to_vec(),
        }
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse raw user input and add it.
    pub fn add_input(&mut self, input: &str) -> Result<f64, ParameterError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParameterError::Empty);
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ParameterError::NotANumber(trimmed.to_string()))?;
        if value.is_nan() {
            return Err(ParameterError::NotANumber(trimmed.to_string()));
        }
        self.add(value)?;
        Ok(value)
    }

    /// Add a value, keeping the list sorted ascending.
    pub fn add(&mut self, value: f64) -> Result<(), ParameterError> {
        if !self.kind.contains(value) {
            return Err(ParameterError::OutOfRange {
                kind: self.kind,
                value,
            });
        }
        if self.values.contains(&value) {
            return Err(ParameterError::Duplicate {
                kind: self.kind,
                value,
            });
        }
        self.values.push(value);
        self.values.sort_by(f64::total_cmp);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<f64> {
        if index < self.values.len() {
            Some(self.values.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
