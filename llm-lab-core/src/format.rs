//! Display formatting for scores, metric names and timestamps.
//!
//! Every function here is total: out-of-range or malformed input is rendered,
//! never rejected.

use chrono::{DateTime, NaiveDateTime};

pub const PERCENTAGE_MULTIPLIER: f64 = 100.0;
pub const DEFAULT_DECIMAL_PLACES: usize = 1;

const SCORE_SUFFIX: &str = "_score";
const DATE_DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// `0.5` -> `"50.0%"`.
pub fn format_percentage(value: f64) -> String {
    format_percentage_with(value, DEFAULT_DECIMAL_PLACES)
}

/// `(0.5, 2)` -> `"50.00%"`.
pub fn format_percentage_with(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * PERCENTAGE_MULTIPLIER)
}

/// `coherence_score` -> `Coherence`, `response_length` -> `Response Length`.
pub fn format_metric_name(name: &str) -> String {
    let base = name.strip_suffix(SCORE_SUFFIX).unwrap_or(name);
    base.replace('_', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render a backend timestamp for display, falling back to the raw input.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.format(DATE_DISPLAY_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return dt.format(DATE_DISPLAY_FORMAT).to_string();
        }
    }
    raw.to_string()
}
