//! Error types for dashboard operations

use thiserror::Error;

/// Errors that can occur while loading a dashboard
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Result source failed and no cached snapshot could stand in
    #[error("Source error: {0}")]
    Source(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
