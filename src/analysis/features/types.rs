// Types module - Data structures for extracted features
//
// This module defines the feature vector layout shared by the extractor, the
// scaler and the classifier, plus the summary statistics used to explain a
// decision.

use serde::{Deserialize, Serialize};

/// Number of scalar prosody features appended after the MFCC statistics
pub const PROSODY_FEATURES: usize = 4;

/// Width of the feature vector for `n_mfcc` cepstral coefficients
///
/// Mean and standard deviation over coefficients, deltas and delta-deltas
/// (`2 * 3 * n_mfcc`) followed by pitch mean, pitch std, jitter and shimmer.
pub fn feature_len(n_mfcc: usize) -> usize {
    6 * n_mfcc + PROSODY_FEATURES
}

/// Raw feature vector
///
/// Layout: `[mfcc_mean(3N), mfcc_std(3N), pitch_mean, pitch_std, jitter, shimmer]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    /// Trailing `[pitch_mean, pitch_std, jitter, shimmer]`, if present
    pub fn prosody_tail(&self) -> Option<&[f32]> {
        self.0
            .len()
            .checked_sub(PROSODY_FEATURES)
            .map(|start| &self.0[start..])
    }
}

/// Feature vector after training-time normalization
///
/// Only the FeatureScaler creates these, so a classifier can never be fed
/// unscaled features.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScaledFeatureVector(Vec<f32>);

impl ScaledFeatureVector {
    pub(crate) fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Summary statistics describing the voice, used for explanations only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Mean pitch of the retained pitch samples (Hz)
    pub pitch_mean: f32,
    /// Standard deviation of the retained pitch samples (Hz)
    pub pitch_std: f32,
    /// Mean absolute change between consecutive pitch samples (Hz)
    pub jitter: f32,
    /// Mean absolute change between consecutive frame RMS values
    pub shimmer: f32,
    /// Mean of the per-row MFCC standard deviations
    pub mfcc_std_mean: f32,
}
