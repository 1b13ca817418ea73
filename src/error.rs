//! Study Buddy Error Types
//!
//! Centralized error handling for the ask/respond workflow.

use thiserror::Error;

/// Central error type for Study Buddy
#[derive(Error, Debug)]
pub enum BuddyError {
    #[error("A question is already being processed")]
    Busy,

    #[error("Speech Recognition not supported on this system.")]
    SpeechUnavailable,

    #[error("Speech recognition is already listening")]
    RecognitionActive,

    #[error("Unsupported file type: {0} (only PDF documents can be loaded)")]
    UnsupportedMediaType(String),

    #[error("Could not read document: {0}")]
    Document(String),

    #[error("An answer and an email address are required before sending")]
    EmailUnavailable,

    #[error("ASR engine error: {0}")]
    Asr(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for Study Buddy operations
pub type BuddyResult<T> = Result<T, BuddyError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for BuddyError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        BuddyError::Lock(err.to_string())
    }
}
