//! Engine error types.

use thiserror::Error;

/// Errors that can occur around the engine boundary.
///
/// Malformed markup is never an error; it is the input the detectors
/// exist to report on. These variants cover engine misuse and collaborator
/// failures only.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid suggestion pattern syntax.
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Unknown detector identifier.
    #[error("Unknown detector: {0}")]
    UnknownDetector(String),

    /// I/O error (configuration loading only; the engine itself performs
    /// no I/O).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a pattern error.
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern(message.into())
    }
}
