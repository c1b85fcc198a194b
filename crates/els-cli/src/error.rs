//! Error types for the CLI application.

use els_parser::ParseError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parser error
    #[error("Parser error: {0}")]
    Parse(#[from] ParseError),

    /// Fragment source error
    #[error(transparent)]
    Source(#[from] anyhow::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A worker task did not complete
    #[error("Task failed: {0}")]
    Task(String),

    /// One or more documents ended with status error
    #[error("{0} document(s) failed to normalize")]
    DocumentsFailed(usize),
}
