use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the sibyl workspace.
///
/// Covers input validation, too-short histories, data-source failures and
/// predictor failures. Every stage returns these synchronously to its caller;
/// nothing is retried or swallowed.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SibylError {
    /// Non-finite values, empty series, malformed shapes or invalid configuration.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Fewer observations than a single window (plus its label) requires.
    ///
    /// This is a user-correctable condition (the requested date range is too
    /// short), not a system fault.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum number of observations required.
        required: usize,
        /// Number of observations actually available.
        actual: usize,
    },

    /// The data source returned nothing for the request.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing data, e.g. "price history for AAPL".
        what: String,
    },

    /// The price data source failed.
    #[error("{source_name} failed: {msg}")]
    Source {
        /// Name of the source that failed.
        source_name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The price data source exceeded the configured fetch timeout.
    #[error("source timed out: {source_name}")]
    SourceTimeout {
        /// Name of the source that timed out.
        source_name: String,
    },

    /// The predictor failed, or its artifact could not be loaded.
    #[error("model error: {0}")]
    Model(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl SibylError {
    /// Helper: build a `Source` error with the source name and message.
    pub fn source_failed(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `SourceTimeout` error.
    pub fn source_timeout(source_name: impl Into<String>) -> Self {
        Self::SourceTimeout {
            source_name: source_name.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing data.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `InsufficientData` error.
    #[must_use]
    pub const fn insufficient(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Helper: `InvalidInput` for a non-finite value found at `index` of `what`.
    pub fn non_finite(what: &str, index: usize, value: f64) -> Self {
        Self::InvalidInput(format!("{what}[{index}] is not finite ({value})"))
    }

    /// Helper: `InvalidInput` for a length/shape disagreement.
    pub fn shape_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        Self::InvalidInput(format!(
            "{what}: expected length {expected}, got {actual}"
        ))
    }

    /// Returns true if the caller can fix this by changing the request
    /// (different symbol or a longer date range).
    #[must_use]
    pub const fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. } | Self::NotFound { .. }
        )
    }
}
