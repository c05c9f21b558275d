// Request validation at the API boundary
//
// Checks run in a fixed order (language, format, audio) and the first
// failure is reported. Nothing here touches the audio bytes themselves.

use std::fmt;
use std::str::FromStr;

use crate::api::types::VoiceRequest;
use crate::error::ValidationError;

/// The only accepted `audioFormat`
pub const SUPPORTED_FORMAT: &str = "mp3";

/// Languages accepted for response labelling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Hindi,
    Tamil,
    Telugu,
    Malayalam,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Hindi,
        Language::Tamil,
        Language::Telugu,
        Language::Malayalam,
    ];

    /// Capitalized name used in responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Malayalam => "Malayalam",
        }
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    /// Case-insensitive match against the allow-list
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnsupportedLanguage {
                language: s.to_string(),
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRequest<'a> {
    pub language: Option<Language>,
    pub audio_format: &'a str,
    /// Base64 text, non-empty
    pub audio_base64: &'a str,
}

/// Validate a request body
///
/// # Errors
/// The first failing check as a `ValidationError`.
pub fn validate(request: &VoiceRequest) -> Result<ValidatedRequest<'_>, ValidationError> {
    let language = request
        .language
        .as_deref()
        .map(Language::from_str)
        .transpose()?;

    let audio_format = match request.audio_format.as_deref() {
        Some(format) if format == SUPPORTED_FORMAT => format,
        other => {
            return Err(ValidationError::UnsupportedFormat {
                format: other.map(str::to_string),
            })
        }
    };

    let audio_base64 = match request.audio_base64.as_deref() {
        Some(b64) if !b64.trim().is_empty() => b64,
        _ => return Err(ValidationError::MissingAudio),
    };

    Ok(ValidatedRequest {
        language,
        audio_format,
        audio_base64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(language: Option<&str>, format: Option<&str>, audio: Option<&str>) -> VoiceRequest {
        VoiceRequest {
            language: language.map(str::to_string),
            audio_format: format.map(str::to_string),
            audio_base64: audio.map(str::to_string),
        }
    }

    #[test]
    fn test_all_languages_any_case() {
        for name in ["english", "HINDI", "Tamil", "tElUgU", "malayalam"] {
            let req = request(Some(name), Some("mp3"), Some("AAAA"));
            let validated = validate(&req).unwrap();
            assert!(validated.language.is_some(), "{} should be accepted", name);
        }
        assert_eq!("tamil".parse::<Language>().unwrap().to_string(), "Tamil");
    }

    #[test]
    fn test_unknown_language_rejected() {
        for name in ["french", "", "eng", "english!"] {
            let err = validate(&request(Some(name), Some("mp3"), Some("AAAA"))).unwrap_err();
            assert!(
                matches!(err, ValidationError::UnsupportedLanguage { .. }),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_language_is_optional() {
        let req = request(None, Some("mp3"), Some("AAAA"));
        let validated = validate(&req).unwrap();
        assert_eq!(validated.language, None);
    }

    #[test]
    fn test_only_mp3_accepted() {
        for format in [Some("wav"), Some("MP3"), Some(""), None] {
            let err = validate(&request(Some("english"), format, Some("AAAA"))).unwrap_err();
            assert!(matches!(err, ValidationError::UnsupportedFormat { .. }));
        }
    }

    #[test]
    fn test_missing_audio() {
        for audio in [None, Some(""), Some("   ")] {
            let err = validate(&request(Some("english"), Some("mp3"), audio)).unwrap_err();
            assert_eq!(err, ValidationError::MissingAudio);
        }
    }

    #[test]
    fn test_checks_run_in_order() {
        // Everything wrong: language is reported first
        let err = validate(&request(Some("klingon"), Some("wav"), None)).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedLanguage { .. }));

        let err = validate(&request(Some("hindi"), Some("wav"), None)).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedFormat { .. }));
    }
}
