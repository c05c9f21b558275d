// Pipeline - end-to-end detection for a single recording
//
// bytes → AudioLoader → Waveform → FeatureExtractor → (FeatureVector,
// Statistics) → FeatureScaler → Classifier → DecisionEngine
//
// Every component is immutable after construction, so one pipeline behind an
// `Arc` serves any number of concurrent requests without locking. Widths of
// the extractor, scaler and classifier are checked once in `new`.

use std::sync::Arc;

use log::{debug, info};

use crate::analysis::classifier::Classifier;
use crate::analysis::decision::{ClassificationResult, DecisionEngine};
use crate::analysis::features::{FeatureExtractor, FeatureVector, Statistics};
use crate::analysis::scaler::FeatureScaler;
use crate::audio::{AudioLoader, Waveform};
use crate::config::AppConfig;
use crate::error::PipelineError;

/// Detection pipeline with its loaded model artifacts
pub struct DetectionPipeline {
    loader: AudioLoader,
    extractor: FeatureExtractor,
    scaler: FeatureScaler,
    classifier: Arc<dyn Classifier>,
    engine: DecisionEngine,
}

impl DetectionPipeline {
    /// Assemble a pipeline from configuration and loaded artifacts
    ///
    /// # Errors
    /// `PipelineError::ConfigMismatch` if the scaler or the classifier expect
    /// a different width than the configured feature extractor produces.
    pub fn new(
        config: &AppConfig,
        scaler: FeatureScaler,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, PipelineError> {
        let extractor = FeatureExtractor::new(&config.features);
        let width = extractor.feature_len();

        if scaler.input_len() != width {
            return Err(PipelineError::ConfigMismatch {
                component: "FeatureScaler".to_string(),
                expected: scaler.input_len(),
                actual: width,
            });
        }
        if classifier.input_len() != width {
            return Err(PipelineError::ConfigMismatch {
                component: classifier.name().to_string(),
                expected: classifier.input_len(),
                actual: width,
            });
        }

        info!(
            "Detection pipeline ready: classifier={}, features={}, sample_rate={} Hz",
            classifier.name(),
            width,
            config.features.sample_rate
        );

        Ok(Self {
            loader: AudioLoader::new(&config.features, &config.decode),
            extractor,
            scaler,
            classifier,
            engine: DecisionEngine::new(config.explanation),
        })
    }

    /// Width of the feature vectors flowing through the pipeline
    pub fn feature_len(&self) -> usize {
        self.extractor.feature_len()
    }

    /// Classify encoded audio
    pub fn analyze(&self, bytes: &[u8], declared_format: &str) -> Result<ClassificationResult, PipelineError> {
        let waveform = self.loader.load(bytes, declared_format)?;
        self.analyze_waveform(&waveform)
    }

    /// Classify an already decoded waveform
    pub fn analyze_waveform(&self, waveform: &Waveform) -> Result<ClassificationResult, PipelineError> {
        let (features, stats) = self.extractor.extract(waveform)?;
        self.classify_features(&features, &stats)
    }

    /// Scale, score and decide on extracted features
    pub fn classify_features(
        &self,
        features: &FeatureVector,
        stats: &Statistics,
    ) -> Result<ClassificationResult, PipelineError> {
        let scaled = self.scaler.scale(features)?;
        let probability = self.classifier.score(&scaled)?;
        if !probability.is_finite() {
            return Err(PipelineError::InvalidScore { score: probability });
        }
        let probability = probability.clamp(0.0, 1.0);

        let result = self.engine.decide(probability, stats);
        debug!(
            "Scored {}: probability={:.4}, label={}, confidence={}",
            self.classifier.name(),
            probability,
            result.label,
            result.confidence
        );
        Ok(result)
    }

    /// Decode and extract without classifying
    pub fn extract(&self, bytes: &[u8], declared_format: &str) -> Result<(FeatureVector, Statistics), PipelineError> {
        let waveform = self.loader.load(bytes, declared_format)?;
        self.extractor.extract(&waveform)
    }
}
