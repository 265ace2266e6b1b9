//! Pipeline error types
//!
//! Error codes:
//! - CRIT_QUERY_FAILURE (ERROR)
//! - CRIT_MISSING_DATA (ERROR)
//! - CRIT_DECODE_FAILED (ERROR)
//! - CRIT_CONFIG_ERROR (ERROR)
//! - CRIT_EXPORT_FAILED (ERROR)
//!
//! None of these are fatal to the process. A failed render pass is reported
//! and the caller may simply run the pass again.

use std::fmt;

use thiserror::Error;

/// Result type for pipeline operations
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Which aggregate a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AggregateKind {
    /// Evaluation-criteria counts per entity
    Criteria,
    /// Enrollment and class counts per entity
    Enrollment,
}

impl AggregateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateKind::Criteria => "criteria",
            AggregateKind::Enrollment => "enrollment",
        }
    }
}

impl fmt::Display for AggregateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised anywhere between the query source and the export writer
#[derive(Debug, Clone, Error)]
pub enum DashboardError {
    /// The store rejected or could not run a query.
    ///
    /// Carries the full SQL text so the failing statement can be inspected.
    #[error("query failed: {reason}")]
    QueryFailure { query: String, reason: String },

    /// One or both aggregates are unavailable, so nothing can be merged.
    #[error("aggregates unavailable: {}", join_kinds(.unavailable))]
    MissingData {
        unavailable: Vec<AggregateKind>,
        causes: Vec<DashboardError>,
    },

    /// A result cell did not have the expected shape.
    #[error("cannot decode column '{column}': {reason}")]
    Decode { column: String, reason: String },

    /// Configuration could not be loaded or failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The export writer failed.
    #[error("export failed: {0}")]
    Export(String),
}

fn join_kinds(kinds: &[AggregateKind]) -> String {
    kinds
        .iter()
        .map(AggregateKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl DashboardError {
    pub fn query_failure(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::QueryFailure {
            query: query.into(),
            reason: reason.into(),
        }
    }

    pub fn decode(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::QueryFailure { .. } => "CRIT_QUERY_FAILURE",
            DashboardError::MissingData { .. } => "CRIT_MISSING_DATA",
            DashboardError::Decode { .. } => "CRIT_DECODE_FAILED",
            DashboardError::Config(_) => "CRIT_CONFIG_ERROR",
            DashboardError::Export(_) => "CRIT_EXPORT_FAILED",
        }
    }

    /// The SQL text attached to a query failure, if any
    pub fn query(&self) -> Option<&str> {
        match self {
            DashboardError::QueryFailure { query, .. } => Some(query),
            _ => None,
        }
    }
}

impl From<csv::Error> for DashboardError {
    fn from(e: csv::Error) -> Self {
        DashboardError::Export(e.to_string())
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(e: std::io::Error) -> Self {
        DashboardError::Export(e.to_string())
    }
}
