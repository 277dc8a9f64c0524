//! Client-side ordering of in-memory record lists.
//!
//! Sorting is stable and never mutates its input. Equal values keep their
//! relative input order. NaN sorts after every number in both directions.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig<K> {
    pub key: K,
    pub direction: SortDirection,
}

/// Tracks the active sort key and direction for a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState<K> {
    current: Option<SortConfig<K>>,
}

impl<K> Default for SortState<K> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<K: PartialEq> SortState<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SortConfig<K>> {
        self.current.as_ref()
    }

    /// Same key flips the direction; a new key starts ascending.
    pub fn handle_sort(&mut self, key: K) -> &SortConfig<K> {
        let direction = match &self.current {
            Some(active) if active.key == key => active.direction.toggled(),
            _ => SortDirection::Asc,
        };
        self.current.insert(SortConfig { key, direction })
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Order `data` by the active key, or keep input order when none is set.
    pub fn apply<'a, T, F>(&self, data: &'a [T], value: F) -> Vec<&'a T>
    where
        F: Fn(&T, &K) -> f64,
    {
        match &self.current {
            Some(config) => sort_records(data, &config.key, config.direction, value),
            None => data.iter().collect(),
        }
    }
}

/// Stable sort of `data` by the numeric value extracted for `key`.
pub fn sort_records<'a, T, K, F>(
    data: &'a [T],
    key: &K,
    direction: SortDirection,
    value: F,
) -> Vec<&'a T>
where
    F: Fn(&T, &K) -> f64,
{
    let mut keyed: Vec<(f64, &'a T)> = data.iter().map(|item| (value(item, key), item)).collect();
    keyed.sort_by(|(a, _), (b, _)| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // Both are numbers here, so `partial_cmp` is total.
        (false, false) => {
            let ordering = a.partial_cmp(b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    });
    keyed.into_iter().map(|(_, item)| item).collect()
}
