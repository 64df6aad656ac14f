//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Catalog could not be resolved or loaded
    #[error("Catalog error: {message}")]
    Catalog {
        /// Error message
        message: String,
    },

    /// Lint findings at failing severity
    #[error("Lint failed: {findings} finding(s) across {catalogs} catalog(s)")]
    LintFailed {
        /// Number of failing findings
        findings: usize,
        /// Number of catalogs linted
        catalogs: usize,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cotejar library error
    #[error("Cotejar error: {0}")]
    Cotejar(#[from] cotejar::CotejarError),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create a catalog error
    #[must_use]
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a lint failure
    #[must_use]
    pub const fn lint_failed(findings: usize, catalogs: usize) -> Self {
        Self::LintFailed { findings, catalogs }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
