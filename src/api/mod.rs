//! Request orchestration for the voice detection endpoint.
//!
//! Validates the request body, decodes the base64 payload and runs the
//! detection pipeline. Transport concerns (authentication, status codes) live
//! in the `http` module.

pub mod types;
pub mod validation;

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::analysis::DetectionPipeline;
use crate::error::{ErrorCode, PipelineError, ValidationError};

pub use types::{ErrorResponse, SuccessResponse, VoiceRequest};
pub use validation::{validate, Language, ValidatedRequest, SUPPORTED_FORMAT};

/// Failure of a detection request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// The request was rejected before any audio was processed
    Validation(ValidationError),
    /// Decoding, extraction or scoring failed
    Pipeline(PipelineError),
}

impl RequestError {
    /// Message safe to return to the caller
    pub fn public_message(&self) -> String {
        match self {
            RequestError::Validation(err) => err.message(),
            RequestError::Pipeline(err) => err.public_message().to_string(),
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Validation(err) => write!(f, "{}", err),
            RequestError::Pipeline(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for RequestError {}

impl From<ValidationError> for RequestError {
    fn from(err: ValidationError) -> Self {
        RequestError::Validation(err)
    }
}

impl From<PipelineError> for RequestError {
    fn from(err: PipelineError) -> Self {
        RequestError::Pipeline(err)
    }
}

/// Decode the base64 audio payload
///
/// Whitespace (line-wrapped base64) is ignored. Invalid base64 is a decode
/// failure, not a validation failure.
pub fn decode_audio_base64(text: &str) -> Result<Vec<u8>, PipelineError> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact).map_err(|err| PipelineError::Decode {
        reason: format!("invalid base64 payload: {}", err),
    })?;
    if bytes.is_empty() {
        return Err(PipelineError::Decode {
            reason: "base64 payload decoded to zero bytes".to_string(),
        });
    }
    Ok(bytes)
}

/// Validate and process one detection request
pub fn detect(pipeline: &DetectionPipeline, request: &VoiceRequest) -> Result<SuccessResponse, RequestError> {
    let validated = validate(request)?;
    let audio = decode_audio_base64(validated.audio_base64)?;

    log::debug!(
        "Detection request: language={:?}, format={}, bytes={}",
        validated.language,
        validated.audio_format,
        audio.len()
    );

    let result = pipeline.analyze(&audio, validated.audio_format)?;
    Ok(SuccessResponse::new(
        validated.language.map(|lang| lang.to_string()),
        result,
    ))
}
