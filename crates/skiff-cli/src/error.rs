//! CLI error types

use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// API client error
    #[error(transparent)]
    Api(#[from] skiff_api::ApiError),

    /// Deploy engine error
    #[error(transparent)]
    Deploy(#[from] skiff_deploy::DeployError),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
