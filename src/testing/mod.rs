//! Test support: synthetic audio, MP3 streams and classifier doubles.
//!
//! Shared by unit tests, the integration tests under `tests/` and anyone
//! exercising the pipeline without trained artifacts.

pub mod mp3;
pub mod synth;

use crate::analysis::{Classifier, ScaledFeatureVector};
use crate::error::PipelineError;

/// Classifier returning the same probability for every input
///
/// Still enforces the input width, so width mismatches surface exactly as
/// they would with a real model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedScoreClassifier {
    input_len: usize,
    probability: f32,
}

impl FixedScoreClassifier {
    pub fn new(input_len: usize, probability: f32) -> Self {
        Self {
            input_len,
            probability,
        }
    }
}

impl Classifier for FixedScoreClassifier {
    fn input_len(&self) -> usize {
        self.input_len
    }

    fn score(&self, features: &ScaledFeatureVector) -> Result<f32, PipelineError> {
        if features.len() != self.input_len {
            return Err(PipelineError::ConfigMismatch {
                component: self.name().to_string(),
                expected: self.input_len,
                actual: features.len(),
            });
        }
        Ok(self.probability)
    }

    fn name(&self) -> &str {
        "fixed_score"
    }
}
