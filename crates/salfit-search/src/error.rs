//! Error types for search operations

use salfit_domain::DomainError;
use thiserror::Error;

/// Errors that can stop a search run
#[derive(Error, Debug)]
pub enum SearchError {
    /// No mutation operator can produce a feasible candidate from the current best
    #[error("No applicable adaptation: every candidate violates 0 <= Q1 < Q3")]
    NoApplicableAdaptation,

    /// Statistical primitive failure (empty sample set, zero target)
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Reference dataset has no profile to fit against
    #[error("Empty reference dataset")]
    EmptyReference,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
