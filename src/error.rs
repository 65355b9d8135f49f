//! Error types for the transcription pipeline

use std::fmt;

/// Errors that can occur while loading audio or transcribing it
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptionError {
    /// Invalid input parameters (configuration, sample rate, empty audio)
    InvalidInput(String),

    /// Audio file could not be opened or decoded
    DecodingError(String),

    /// Processing error while building the energy matrix
    ProcessingError(String),

    /// A chroma frame with the wrong number of bins or a non-finite value
    InvalidFrame(String),
}

impl fmt::Display for TranscriptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            TranscriptionError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            TranscriptionError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            TranscriptionError::InvalidFrame(msg) => write!(f, "Invalid frame: {}", msg),
        }
    }
}

impl std::error::Error for TranscriptionError {}

impl From<std::io::Error> for TranscriptionError {
    fn from(err: std::io::Error) -> Self {
        TranscriptionError::DecodingError(err.to_string())
    }
}

impl From<symphonia::core::errors::Error> for TranscriptionError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        TranscriptionError::DecodingError(err.to_string())
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, TranscriptionError>;
