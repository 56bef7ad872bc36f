//! Error types for the Congress proxy.
//!
//! All failures originate at the upstream-fetch boundary and flow up
//! unchanged through the orchestrator. The cache itself never fails.

use thiserror::Error;

use crate::types::Chamber;

/// Result type alias using `CongressError`.
pub type Result<T> = std::result::Result<T, CongressError>;

/// Main error type for all Congress proxy operations.
#[derive(Debug, Error)]
pub enum CongressError {
    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Connection or read timeout.
    #[error("Connection timeout: {0}")]
    ConnectionTimeout(String),

    /// Upstream answered with a non-success HTTP status code.
    #[error("Unexpected HTTP status from ProPublica API: {status}")]
    UnexpectedStatusCode {
        /// HTTP status code
        status: u16,
    },

    /// Upstream reported a status other than `OK` in the response envelope.
    #[error("Bad status reported from ProPublica API: {0}")]
    BadStatus(String),

    /// Upstream returned an empty result set.
    #[error("No data returned from ProPublica API")]
    NoData,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // AGGREGATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// One branch of a fan-out query failed.
    #[error("Fetching {chamber} failed: {source}")]
    AggregationFailed {
        /// Chamber whose fetch failed
        chamber: Chamber,
        /// Underlying failure
        #[source]
        source: Box<CongressError>,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Bill slug could not be parsed into a bill reference.
    #[error("Invalid bill slug: {0}")]
    InvalidBillSlug(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CongressError {
    /// Returns true if the error was produced by the upstream fetch boundary.
    pub fn is_upstream_error(&self) -> bool {
        matches!(
            self,
            CongressError::HttpError(_)
                | CongressError::ConnectionTimeout(_)
                | CongressError::UnexpectedStatusCode { .. }
                | CongressError::BadStatus(_)
                | CongressError::NoData
                | CongressError::JsonError(_)
                | CongressError::AggregationFailed { .. }
        )
    }

    /// Returns true if this error is recoverable (a later call may succeed).
    pub fn is_recoverable(&self) -> bool {
        match self {
            CongressError::HttpError(_) | CongressError::ConnectionTimeout(_) => true,
            CongressError::UnexpectedStatusCode { status } => *status >= 500,
            CongressError::AggregationFailed { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }

    /// Returns the innermost error, looking through aggregation wrappers.
    pub fn root_cause(&self) -> &CongressError {
        match self {
            CongressError::AggregationFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
