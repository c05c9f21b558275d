use serde::{Deserialize, Serialize};

use crate::analysis::{ClassificationResult, Label};

/// Detection request body
///
/// Every field is optional at the wire level so that absent values are
/// reported as validation errors instead of JSON rejections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub audio_format: Option<String>,
    #[serde(default)]
    pub audio_base64: Option<String>,
}

/// Successful detection response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse {
    /// Always "success"
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub classification: Label,
    pub confidence_score: f32,
    pub explanation: String,
}

impl SuccessResponse {
    pub fn new(language: Option<String>, result: ClassificationResult) -> Self {
        Self {
            status: "success".to_string(),
            language,
            classification: result.label,
            confidence_score: result.confidence,
            explanation: result.explanation,
        }
    }
}

/// Error response: `{"status": "error", "message": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always "error"
    pub status: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
