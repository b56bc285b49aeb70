/// Errors from the catalog domain layer.
use thiserror::Error;

use crate::api::ApiError;
use crate::cli::output::RenderError;

/// Errors that can terminate a command.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Caller-supplied identifiers are incomplete or contradictory.
    #[error("{0}")]
    Usage(String),

    /// A well-formed identifier matched nothing in a fetched collection.
    #[error("{kind} not found: '{identifier}'")]
    NotFound {
        /// Resource kind, e.g. "release".
        kind: &'static str,
        /// The requested identifier.
        identifier: String,
        /// Close identifiers from the same collection, best first.
        suggestions: Vec<String>,
    },

    /// The API client failed. Passed through untouched.
    #[error(transparent)]
    Upstream(#[from] ApiError),

    /// Output encoding failed.
    #[error("Failed to render output: {0}")]
    Render(#[from] RenderError),
}

impl CatalogError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::NotFound { .. } => 4,
            Self::Upstream(api) => match api {
                ApiError::ClientBuild(_) | ApiError::InvalidIdentifier { .. } => 2,
                ApiError::Unauthorized { .. } => 3,
                ApiError::NotFound { .. } => 4,
                _ => 1,
            },
            Self::Render(_) => 1,
        }
    }

    /// Machine-readable error code (snake_case) for structured error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usage(_) | Self::Upstream(ApiError::InvalidIdentifier { .. }) => "usage",
            Self::Upstream(ApiError::ClientBuild(_)) => "config",
            Self::NotFound { .. } => "not_found",
            Self::Upstream(ApiError::Unauthorized { .. }) => "unauthorized",
            Self::Upstream(ApiError::NotFound { .. }) => "api_not_found",
            Self::Upstream(_) => "upstream",
            Self::Render(_) => "serialization",
        }
    }
}
