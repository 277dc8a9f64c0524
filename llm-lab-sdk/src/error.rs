//! SDK error types and handling
//!
//! Every failure the SDK reports is reduced to a message string, so callers can
//! surface errors uniformly. The message is the variant's `Display` output:
//!
//! 1. A backend error with a structured `detail` field surfaces that detail verbatim.
//! 2. A request that was sent but never answered surfaces [`NETWORK_ERROR_MESSAGE`].
//! 3. A request that could not be built surfaces its original message.

use llm_lab_core::CoreError;
use serde::Deserialize;
use thiserror::Error;

/// Message used whenever a request got no response (connect failure, timeout, reset).
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Message used when the backend answered with an error but no usable detail.
pub const GENERIC_API_ERROR_MESSAGE: &str = "An error occurred";

/// The main error type for the SDK
///
/// `Clone` so a single in-flight result can be handed to every waiter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SdkError {
    /// The backend answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request was sent but no response arrived
    #[error("Network error. Please check your connection.")]
    Network {
        /// Underlying transport message, kept for logs only
        cause: String,
        timed_out: bool,
    },

    /// The request could not be constructed
    #[error("{0}")]
    Request(String),

    /// Client-side validation failed; nothing was sent
    #[error("{0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A success response whose body did not match the expected shape
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Local file error while saving an export
    #[error("{0}")]
    Io(String),
}

/// Result type alias for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;

/// Error body shape used by the backend: `{"detail": ...}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl SdkError {
    /// Build an error from a non-success response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|detail| detail_message(&detail))
            .unwrap_or_else(|| GENERIC_API_ERROR_MESSAGE.to_string());

        SdkError::Api { status, message }
    }

    /// Classify a transport failure from `reqwest`.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            SdkError::Request(err.to_string())
        } else {
            SdkError::Network {
                cause: err.to_string(),
                timed_out: err.is_timeout(),
            }
        }
    }

    /// The user-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SdkError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, SdkError::Network { .. })
    }

    /// True for errors raised before any request was sent.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            SdkError::Validation(_) | SdkError::Configuration(_) | SdkError::Request(_)
        )
    }
}

/// Plain-string details are used as-is; validation lists are joined by their `msg` fields.
fn detail_message(detail: &serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(|m| m.as_str()).map(str::to_string),
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

impl From<CoreError> for SdkError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Serialization(msg) => SdkError::Serialization(msg),
            other => SdkError::Validation(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for SdkError {
    fn from(err: url::ParseError) -> Self {
        SdkError::Configuration(format!("Invalid URL: {}", err))
    }
}

impl From<std::io::Error> for SdkError {
    fn from(err: std::io::Error) -> Self {
        SdkError::Io(err.to_string())
    }
}
