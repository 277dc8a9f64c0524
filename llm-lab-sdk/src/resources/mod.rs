//! SDK resource modules
//!
//! This module contains resource-specific clients for interacting with
//! different API endpoints.

pub mod experiments;
pub mod export;
pub mod metrics;
pub mod responses;

pub use experiments::ExperimentsClient;
pub use export::{ExportClient, ExportFile, ExportFormat};
pub use metrics::MetricsClient;
pub use responses::ResponsesClient;
