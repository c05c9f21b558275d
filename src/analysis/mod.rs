// Analysis module - feature extraction, scoring and decisions
//
// Architecture:
// - features: Waveform → (FeatureVector, Statistics)
// - scaler: FeatureVector → ScaledFeatureVector (training-time constants)
// - classifier: ScaledFeatureVector → probability (swappable strategy)
// - decision: probability + Statistics → ClassificationResult
// - pipeline: DetectionPipeline wiring the above behind one immutable object

pub mod classifier;
pub mod decision;
pub mod features;
pub mod pipeline;
pub mod scaler;

pub use classifier::{Activation, Classifier, DenseLayer, DenseNetwork};
pub use decision::{ClassificationResult, DecisionEngine, Label};
pub use features::{FeatureExtractor, FeatureVector, ScaledFeatureVector, Statistics};
pub use pipeline::DetectionPipeline;
pub use scaler::FeatureScaler;
