use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Newtype pattern for ExperimentId
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(transparent)]
pub struct ExperimentId(pub i64);

impl ExperimentId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// A zero id means "no experiment selected"; reads keyed by it stay disabled.
    pub fn is_set(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ExperimentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ExperimentId> for i64 {
    fn from(id: ExperimentId) -> Self {
        id.0
    }
}

impl FromStr for ExperimentId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Newtype pattern for ResponseId
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(transparent)]
pub struct ResponseId(pub i64);

impl ResponseId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ResponseId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ResponseId> for i64 {
    fn from(id: ResponseId) -> Self {
        id.0
    }
}

impl FromStr for ResponseId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
