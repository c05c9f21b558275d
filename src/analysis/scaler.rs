// Scaler - training-time feature standardization
//
// Applies `(x[i] - mean[i]) / scale[i]` elementwise using constants fit when
// the classifier was trained. The constants are loaded once and never
// mutated, so a scaler is shared freely between requests.

use serde::{Deserialize, Serialize};

use crate::analysis::features::{FeatureVector, ScaledFeatureVector};
use crate::error::PipelineError;

/// Serialized scaler constants: `{"mean": [...], "scale": [...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScalerParams {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

/// Per-feature affine normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalerParams", into = "ScalerParams")]
pub struct FeatureScaler {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

impl FeatureScaler {
    /// Create a scaler from per-feature means and scales
    ///
    /// A scale of exactly zero (a feature that was constant during training)
    /// is replaced by 1 so the feature is only centered.
    ///
    /// # Errors
    /// * `PipelineError::ConfigMismatch` if the vectors differ in length
    /// * `PipelineError::Internal` if any constant is not finite
    pub fn new(mean: Vec<f32>, scale: Vec<f32>) -> Result<Self, PipelineError> {
        if mean.len() != scale.len() {
            return Err(PipelineError::ConfigMismatch {
                component: "FeatureScaler scale vector".to_string(),
                expected: mean.len(),
                actual: scale.len(),
            });
        }

        if mean.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err(PipelineError::Internal {
                details: "scaler constants must be finite".to_string(),
            });
        }

        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok(Self { mean, scale })
    }

    /// Scaler that leaves vectors of width `len` unchanged
    pub fn identity(len: usize) -> Self {
        Self {
            mean: vec![0.0; len],
            scale: vec![1.0; len],
        }
    }

    /// Width of the vectors this scaler accepts
    pub fn input_len(&self) -> usize {
        self.mean.len()
    }

    /// Standardize a raw feature vector
    ///
    /// # Errors
    /// `PipelineError::ConfigMismatch` if the vector width differs from
    /// `input_len()`.
    pub fn scale(&self, features: &FeatureVector) -> Result<ScaledFeatureVector, PipelineError> {
        if features.len() != self.input_len() {
            return Err(PipelineError::ConfigMismatch {
                component: "FeatureScaler".to_string(),
                expected: self.input_len(),
                actual: features.len(),
            });
        }

        let values = features
            .as_slice()
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(&x, (&mean, &scale))| (x - mean) / scale)
            .collect();

        Ok(ScaledFeatureVector::new(values))
    }
}

impl TryFrom<ScalerParams> for FeatureScaler {
    type Error = PipelineError;

    fn try_from(params: ScalerParams) -> Result<Self, Self::Error> {
        FeatureScaler::new(params.mean, params.scale)
    }
}

impl From<FeatureScaler> for ScalerParams {
    fn from(scaler: FeatureScaler) -> Self {
        ScalerParams {
            mean: scaler.mean,
            scale: scaler.scale,
        }
    }
}
