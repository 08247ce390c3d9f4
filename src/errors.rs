/*!
 * Error types for the capsync library.
 *
 * This module contains custom error types for the caption pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised by the timestamp codec and transcript ingestion.
///
/// These are fatal to a single call only. Batch processing reports them per
/// file and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptionError {
    /// A seconds value that cannot be rendered as a subtitle timestamp
    #[error("Invalid timestamp value: {0} (must be finite and non-negative)")]
    InvalidTimestamp(f64),

    /// Text that does not match the HH:MM:SS,mmm pattern
    #[error("Malformed timestamp: '{0}' (expected HH:MM:SS,mmm)")]
    MalformedTimestamp(String),

    /// Transcription output that could not be turned into segments
    #[error("Invalid transcript: {0}")]
    InvalidTranscript(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the caption codec
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
