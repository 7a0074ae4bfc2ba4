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

    /// Invalid score or analysis data
    #[error("Invalid scores: {0}")]
    Validation(#[from] ssbmax_domain::ValidationError),

    /// Validator setup error
    #[error(transparent)]
    Validator(#[from] ssbmax_validator::ValidatorError),

    /// Dashboard error
    #[error("Dashboard error: {0}")]
    Dashboard(#[from] ssbmax_dashboard::DashboardError),

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
}
