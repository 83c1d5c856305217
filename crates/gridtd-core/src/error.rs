//! Error types for gridtd

use thiserror::Error;

/// Main error type for gridtd
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias for gridtd operations
pub type Result<T> = std::result::Result<T, GridError>;
