//! API client error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single error entry from the v4 response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Platform error code
    pub code: i64,
    /// Human-readable message
    pub message: String,
}

/// API client errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform reported failure; detail is preserved verbatim
    #[error("API error ({status}): {}", join_messages(.errors))]
    Api {
        /// HTTP status code
        status: u16,
        /// Structured errors from the response envelope
        errors: Vec<ApiMessage>,
    },

    /// The addressed resource does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// A successful envelope carried no result where one was required
    #[error("response for {0} carried no result")]
    MissingResult(String),

    /// Response body did not match the expected shape
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

fn join_messages(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "no detail provided".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{} (code {})", e.message, e.code))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
