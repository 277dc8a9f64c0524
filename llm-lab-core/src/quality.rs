//! Response-quality warning predicate.

use crate::domain::ValidationMetadata;

/// True when the response was truncated, flagged as corrupted, or carries any
/// backend warning. Absent metadata means no warnings.
pub fn has_response_warnings(metadata: Option<&ValidationMetadata>) -> bool {
    metadata.is_some_and(ValidationMetadata::has_warnings)
}
