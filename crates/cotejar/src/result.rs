//! Result and error types for Cotejar
//!
//! DOM-level problems (missing elements, slow text, mismatches) are NOT
//! errors here - they become recorded [`VerificationOutcome`]s so a
//! scenario always runs to completion. This module covers the things that
//! genuinely cannot degrade: catalog/scenario file loading, driver
//! transport faults, action timeouts and the final aggregated report.
//!
//! [`VerificationOutcome`]: crate::collector::VerificationOutcome

use crate::collector::VerificationFailure;
use thiserror::Error;

/// Result type alias for Cotejar operations
pub type CotejarResult<T> = Result<T, CotejarError>;

/// Errors that can occur during Cotejar operations
#[derive(Debug, Error)]
pub enum CotejarError {
    /// An operation exceeded its deadline
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// The underlying browser driver failed
    #[error("Driver call failed: {message}")]
    Driver {
        /// Driver-reported failure description
        message: String,
    },

    /// A locale code could not be recognized
    #[error("Unknown locale: {name}")]
    UnknownLocale {
        /// The offending locale code or menu label
        name: String,
    },

    /// A scenario definition is not usable
    #[error("Invalid scenario '{name}': {message}")]
    InvalidScenario {
        /// Scenario name
        name: String,
        /// What is wrong with it
        message: String,
    },

    /// Aggregated verification failures raised by a collector report
    #[error(transparent)]
    Verification(#[from] VerificationFailure),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse or serialize error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse or serialize error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CotejarError {
    /// Create a driver error from any displayable cause
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }

    /// Create a timeout error
    #[must_use]
    pub const fn timeout(ms: u64) -> Self {
        Self::Timeout { ms }
    }

    /// True if this error is a timeout
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
