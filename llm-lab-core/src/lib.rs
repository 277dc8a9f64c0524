pub mod domain;
pub mod error;
pub mod format;
pub mod params;
pub mod quality;
pub mod sorting;

pub use domain::*;
pub use error::*;
pub use format::{format_date, format_metric_name, format_percentage, format_percentage_with};
pub use params::{ParameterError, ParameterKind, ParameterRange};
pub use quality::has_response_warnings;
pub use sorting::{sort_records, SortConfig, SortDirection, SortState};
