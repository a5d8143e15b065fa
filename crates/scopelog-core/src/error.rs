//! Error types for the scopelog data model
//!
//! Provides the error hierarchy using `thiserror` for proper error handling
//! and error chaining throughout the workspace.

use thiserror::Error;

/// Main error type for the scopelog data model
#[derive(Error, Debug)]
pub enum ScopeLogError {
    /// Message template could not be parsed
    #[error("Invalid message template: {0}")]
    InvalidTemplate(String),

    /// Invalid argument provided to a constructor
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ScopeLogError>;
