// Input validation error types and constants

use crate::error::ErrorCode;
use std::fmt;

/// Validation error code constants
///
/// Error code range: 3001-3003
pub struct ValidationErrorCodes {}

impl ValidationErrorCodes {
    /// Language tag outside the allow-list
    pub const UNSUPPORTED_LANGUAGE: i32 = 3001;

    /// Declared audio format other than mp3
    pub const UNSUPPORTED_FORMAT: i32 = 3002;

    /// Audio payload absent or empty
    pub const MISSING_AUDIO: i32 = 3003;
}

/// Request validation errors
///
/// These are raised at the API boundary before any audio is decoded. Their
/// messages are safe to return to the caller verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Language is not one of the supported languages
    UnsupportedLanguage { language: String },

    /// Declared audio format is not mp3
    UnsupportedFormat { format: Option<String> },

    /// Base64 audio payload missing or empty
    MissingAudio,
}

impl ErrorCode for ValidationError {
    fn code(&self) -> i32 {
        match self {
            ValidationError::UnsupportedLanguage { .. } => {
                ValidationErrorCodes::UNSUPPORTED_LANGUAGE
            }
            ValidationError::UnsupportedFormat { .. } => ValidationErrorCodes::UNSUPPORTED_FORMAT,
            ValidationError::MissingAudio => ValidationErrorCodes::MISSING_AUDIO,
        }
    }

    fn message(&self) -> String {
        match self {
            ValidationError::UnsupportedLanguage { .. } => "Unsupported language".to_string(),
            ValidationError::UnsupportedFormat { .. } => "Only mp3 audio is supported".to_string(),
            ValidationError::MissingAudio => "Missing audio data".to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ValidationError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ValidationError {}
