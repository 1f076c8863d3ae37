//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Search engine error
    #[error("Search error: {0}")]
    Search(#[from] salfit_search::SearchError),

    /// Invalid statistical data
    #[error("Invalid data: {0}")]
    Domain(#[from] salfit_domain::DomainError),

    /// Reference dataset error
    #[error("Reference error: {0}")]
    Reference(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Background search task panicked or was cancelled
    #[error("Search task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
