//! Deploy engine error types

use skiff_api::ApiError;
use std::process::ExitStatus;
use thiserror::Error;

/// Deploy engine errors
#[derive(Debug, Error)]
pub enum DeployError {
    /// Remote platform failure, detail preserved from the API response
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The project exists with a source that cannot be edited into a GitHub
    /// integration. Converging requires deleting it, which discards its
    /// deployment history, so it is gated behind explicit authorization.
    #[error("project '{name}' exists with source type '{source_kind}' and cannot be updated in place")]
    RecreateRequired {
        /// Project name on the platform
        name: String,
        /// Source type the remote record reported
        source_kind: String,
    },

    /// Build subprocess could not be started
    #[error("failed to spawn build command '{command}': {source}")]
    BuildSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Build subprocess exited non-zero
    #[error("build command '{command}' failed with {status}")]
    Build { command: String, status: ExitStatus },

    /// Worker entry point could not be read
    #[error("failed to read worker script '{path}': {source}")]
    ScriptRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for deploy operations
pub type DeployResult<T> = Result<T, DeployError>;
