// Error types for the voice authenticity detector
//
// This module defines custom error types for request validation and the
// detection pipeline, providing structured error handling with error codes
// suitable for logging and for shaping the HTTP error payload.

mod pipeline;
mod validation;

pub use pipeline::{log_pipeline_error, PipelineError, PipelineErrorCodes};
pub use validation::{ValidationError, ValidationErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the HTTP boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
