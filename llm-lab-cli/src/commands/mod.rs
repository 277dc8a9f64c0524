//! CLI command implementations

pub mod config;
pub mod experiments;
pub mod export;
pub mod metrics;
pub mod responses;
