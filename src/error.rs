//! Error types.
//!
//! Each pipeline stage reports its own error enum; `OptimizeError` wraps
//! them for the end-to-end entry point. Infeasibility is an ordinary
//! variant, distinct from a feasible empty selection.

use std::time::Duration;

use crate::validation::ValidationError;

/// Catalog ingestion failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid clock time '{0}' (expected HH:MM, at most 24:00)")]
    InvalidTime(String),

    #[error("catalog key '{key}' does not match courseCode '{id}'")]
    IdMismatch { key: String, id: String },

    #[error("export record '{0}' has no courseCode")]
    MissingCourseCode(String),
}

/// A malformed or inconsistent request bundle or configuration.
///
/// Carries every detected problem, not just the first.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid configuration: {}", join_messages(.errors))]
pub struct ConfigError {
    pub errors: Vec<ValidationError>,
}

impl ConfigError {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl From<Vec<ValidationError>> for ConfigError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::new(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Solver adapter outcomes other than a solution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveError {
    /// No assignment satisfies the constraints.
    #[error("no course selection satisfies the constraints")]
    Infeasible,

    /// Backend failure (unbounded, internal error), with its raw status.
    #[error("solver failed: {status}")]
    Solver { status: String },

    /// The configured wall-clock limit elapsed before the backend finished.
    #[error("solver did not finish within {limit:?}")]
    TimedOut { limit: Duration },
}

/// Result projection failures.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    /// A selected identifier is absent from the catalog.
    #[error("selected course '{0}' is not in the catalog")]
    UnknownCourse(String),

    #[error("failed to serialize schedule records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Any failure of the end-to-end optimization.
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

impl OptimizeError {
    /// Whether the request was well-formed but admits no selection.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, OptimizeError::Solve(SolveError::Infeasible))
    }
}
