// Audio module - decoding, resampling and silence trimming
//
// Turns the raw bytes of an uploaded recording into the immutable mono
// Waveform consumed by feature extraction:
//
//   bytes → DecodeStaging → decoder (symphonia) → resample (rubato) → trim
//
// The staging resource (in-memory buffer or temporary file) is dropped before
// `load` returns, on success and on every error path.

pub mod decoder;
pub mod resample;
pub mod staging;
pub mod trim;

pub use staging::DecodeStaging;
pub use trim::{frame_rms, trim_silence};

use log::debug;

use crate::config::{DecodeConfig, FeatureConfig, StagingMode};
use crate::error::PipelineError;

/// Mono PCM samples at a fixed sample rate
///
/// Produced by the AudioLoader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// AudioLoader decodes uploaded audio into an analysis-ready Waveform
pub struct AudioLoader {
    target_rate: u32,
    top_db: f32,
    frame_length: usize,
    hop_length: usize,
    staging: StagingMode,
}

impl AudioLoader {
    /// Create a loader from the feature and decode configuration
    pub fn new(features: &FeatureConfig, decode: &DecodeConfig) -> Self {
        Self {
            target_rate: features.sample_rate,
            top_db: features.top_db,
            frame_length: features.n_fft,
            hop_length: features.hop_length,
            staging: decode.staging,
        }
    }

    pub fn target_rate(&self) -> u32 {
        self.target_rate
    }

    /// Decode, downmix, resample and trim an audio payload
    ///
    /// # Arguments
    /// * `bytes` - Encoded audio
    /// * `declared_format` - Format tag from the request, used as a probe hint
    ///
    /// # Errors
    /// `PipelineError::Decode` if the bytes are not decodable audio or nothing
    /// but silence remains after trimming.
    pub fn load(&self, bytes: &[u8], declared_format: &str) -> Result<Waveform, PipelineError> {
        if bytes.is_empty() {
            return Err(PipelineError::Decode {
                reason: "empty audio payload".to_string(),
            });
        }

        let decoded = {
            let staged = DecodeStaging::acquire(self.staging, bytes, declared_format)?;
            decoder::decode(staged.media_source()?, declared_format)?
        };

        debug!(
            "Decoded {} samples at {} Hz ({} channels)",
            decoded.samples.len(),
            decoded.sample_rate,
            decoded.channels
        );

        let resampled = resample::resample(&decoded.samples, decoded.sample_rate, self.target_rate)?;
        let range = trim_silence(&resampled, self.top_db, self.frame_length, self.hop_length);
        if range.is_empty() {
            return Err(PipelineError::Decode {
                reason: "waveform is empty after silence trimming".to_string(),
            });
        }

        Ok(Waveform::new(resampled[range].to_vec(), self.target_rate))
    }
}
