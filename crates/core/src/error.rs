//! Error types for Quill.
//!
//! This module defines a unified error enum covering every failure category
//! in the pipeline: input validation, workspace lookup, embedding and
//! generation capability failures, configuration, and I/O.

use thiserror::Error;

/// Unified error type for Quill.
///
/// All fallible functions return `Result<T, AppError>`. Every variant carries
/// a kind plus a message so callers can distinguish bad input from a missing
/// workspace from an upstream capability failure. We never panic — errors
/// must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or empty required input. Surfaced immediately, never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown workspace identifier.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Workspace exists but contains no documents.
    #[error("Empty workspace: {0}")]
    EmptyWorkspace(String),

    /// Embedding provider failure.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Generative capability failure.
    #[error("Generation error: {0}")]
    Generation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
