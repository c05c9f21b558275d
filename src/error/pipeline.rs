// Detection pipeline error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Pipeline error code constants
///
/// Error code range: 4001-4004
pub struct PipelineErrorCodes {}

impl PipelineErrorCodes {
    /// Audio bytes could not be decoded, or nothing was left after trimming
    pub const DECODE: i32 = 4001;

    /// Feature width disagrees with the scaler or classifier
    pub const CONFIG_MISMATCH: i32 = 4002;

    /// Classifier produced an unusable score
    pub const INVALID_SCORE: i32 = 4003;

    /// Any other failure inside the pipeline
    pub const INTERNAL: i32 = 4004;
}

/// Log a pipeline error with structured context
///
/// Logs the error code, the component and the full internal message. The
/// internal message is never part of the HTTP response.
pub fn log_pipeline_error(err: &PipelineError, context: &str) {
    error!(
        "Pipeline error in {}: code={}, component=DetectionPipeline, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Detection pipeline errors
///
/// These cover decoding, feature/scaler/classifier width agreement and
/// classifier output sanity.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Audio could not be decoded or is empty after silence trimming
    Decode { reason: String },

    /// Feature vector width does not match what a component expects
    ConfigMismatch {
        component: String,
        expected: usize,
        actual: usize,
    },

    /// Classifier returned NaN or infinity
    InvalidScore { score: f32 },

    /// Unexpected failure (worker panic, I/O while staging, ...)
    Internal { details: String },
}

impl PipelineError {
    /// Message safe to return to an API caller
    ///
    /// Decode failures are reported as a generic processing failure and
    /// everything else as an internal server error.
    pub fn public_message(&self) -> &'static str {
        match self {
            PipelineError::Decode { .. } => "Unable to process audio data",
            _ => "Internal server error during audio processing",
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, PipelineError::Decode { .. })
    }
}

impl ErrorCode for PipelineError {
    fn code(&self) -> i32 {
        match self {
            PipelineError::Decode { .. } => PipelineErrorCodes::DECODE,
            PipelineError::ConfigMismatch { .. } => PipelineErrorCodes::CONFIG_MISMATCH,
            PipelineError::InvalidScore { .. } => PipelineErrorCodes::INVALID_SCORE,
            PipelineError::Internal { .. } => PipelineErrorCodes::INTERNAL,
        }
    }

    fn message(&self) -> String {
        match self {
            PipelineError::Decode { reason } => format!("Failed to decode audio: {}", reason),
            PipelineError::ConfigMismatch {
                component,
                expected,
                actual,
            } => format!(
                "{} expects {} features, pipeline produces {}",
                component, expected, actual
            ),
            PipelineError::InvalidScore { score } => {
                format!("Classifier returned non-finite score {}", score)
            }
            PipelineError::Internal { details } => format!("Internal error: {}", details),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PipelineError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for PipelineError {}

/// Convert from std::io::Error to PipelineError
impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Internal {
            details: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_codes() {
        assert_eq!(
            PipelineError::Decode {
                reason: "test".to_string()
            }
            .code(),
            4001
        );
        assert_eq!(
            PipelineError::ConfigMismatch {
                component: "scaler".to_string(),
                expected: 82,
                actual: 80
            }
            .code(),
            4002
        );
        assert_eq!(PipelineError::InvalidScore { score: f32::NAN }.code(), 4003);
        assert_eq!(
            PipelineError::Internal {
                details: "test".to_string()
            }
            .code(),
            4004
        );
    }

    #[test]
    fn test_public_message_hides_details() {
        let err = PipelineError::Decode {
            reason: "symphonia: malformed frame header at /tmp/xyz".to_string(),
        };
        assert_eq!(err.public_message(), "Unable to process audio data");
        assert!(err.message().contains("malformed frame header"));

        let err = PipelineError::Internal {
            details: "worker panicked".to_string(),
        };
        assert_eq!(
            err.public_message(),
            "Internal server error during audio processing"
        );
    }

    #[test]
    fn test_config_mismatch_message() {
        let err = PipelineError::ConfigMismatch {
            component: "classifier".to_string(),
            expected: 82,
            actual: 64,
        };
        assert!(err.message().contains("expects 82"));
        assert!(err.message().contains("produces 64"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "test error");
        let err: PipelineError = io_err.into();

        match err {
            PipelineError::Internal { details } => {
                assert!(details.contains("test error"));
            }
            _ => panic!("Expected Internal variant"),
        }
    }
}
