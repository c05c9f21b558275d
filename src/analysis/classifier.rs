// Classifier - scoring of scaled feature vectors
//
// The detection pipeline only depends on the `Classifier` trait: a pure,
// stateless function from a scaled feature vector to the probability that
// the voice is synthetic. `DenseNetwork` is the bundled implementation, a
// feed-forward network whose trained parameters are loaded from JSON.
//
// Weight layout follows the usual dense-layer kernel convention:
// `weights[input][output]`, so a layer computes
//   y[j] = activation(bias[j] + Σ_i x[i] · weights[i][j])

use serde::{Deserialize, Serialize};

use crate::analysis::features::ScaledFeatureVector;
use crate::error::PipelineError;

/// Scoring strategy used by the detection pipeline
///
/// Implementations must be deterministic and must not mutate state while
/// scoring; one instance is shared by all concurrent requests.
pub trait Classifier: Send + Sync {
    /// Width of the scaled feature vectors this classifier accepts
    fn input_len(&self) -> usize;

    /// Probability in [0, 1] that the voice is synthetic
    fn score(&self, features: &ScaledFeatureVector) -> Result<f32, PipelineError>;

    /// Short name for logs
    fn name(&self) -> &str {
        "classifier"
    }
}

/// Layer activation function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Linear,
    Relu,
    Tanh,
    Sigmoid,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Tanh => x.tanh(),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }
}

/// Fully connected layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    /// `[inputs][outputs]`
    pub weights: Vec<Vec<f32>>,
    /// `[outputs]`
    pub bias: Vec<f32>,
    pub activation: Activation,
}

impl DenseLayer {
    fn inputs(&self) -> usize {
        self.weights.len()
    }

    fn outputs(&self) -> usize {
        self.bias.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        (0..self.outputs())
            .map(|j| {
                let z = input
                    .iter()
                    .zip(&self.weights)
                    .fold(self.bias[j] as f64, |acc, (&x, row)| acc + x * row[j] as f64);
                self.activation.apply(z)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct NetworkParams {
    layers: Vec<DenseLayer>,
}

/// Feed-forward network with a single output unit
///
/// The output is clamped into [0, 1]; a final `sigmoid` activation is
/// expected for a calibrated probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkParams")]
pub struct DenseNetwork {
    layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    /// Build a network, checking that the layer shapes chain together
    ///
    /// # Errors
    /// `PipelineError::ConfigMismatch` when a layer is malformed, consecutive
    /// layers disagree on width, or the last layer has more than one output.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self, PipelineError> {
        if layers.is_empty() {
            return Err(PipelineError::ConfigMismatch {
                component: "DenseNetwork layer count".to_string(),
                expected: 1,
                actual: 0,
            });
        }

        for (index, layer) in layers.iter().enumerate() {
            if let Some(row) = layer.weights.iter().find(|row| row.len() != layer.outputs()) {
                return Err(PipelineError::ConfigMismatch {
                    component: format!("DenseNetwork layer {} kernel", index),
                    expected: layer.outputs(),
                    actual: row.len(),
                });
            }
            if index > 0 && layer.inputs() != layers[index - 1].outputs() {
                return Err(PipelineError::ConfigMismatch {
                    component: format!("DenseNetwork layer {}", index),
                    expected: layers[index - 1].outputs(),
                    actual: layer.inputs(),
                });
            }
        }

        let outputs = layers.last().map(DenseLayer::outputs).unwrap_or(0);
        if outputs != 1 {
            return Err(PipelineError::ConfigMismatch {
                component: "DenseNetwork output".to_string(),
                expected: 1,
                actual: outputs,
            });
        }

        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }
}

impl TryFrom<NetworkParams> for DenseNetwork {
    type Error = PipelineError;

    fn try_from(params: NetworkParams) -> Result<Self, Self::Error> {
        DenseNetwork::new(params.layers)
    }
}

impl Classifier for DenseNetwork {
    fn input_len(&self) -> usize {
        self.layers.first().map(DenseLayer::inputs).unwrap_or(0)
    }

    fn score(&self, features: &ScaledFeatureVector) -> Result<f32, PipelineError> {
        if features.len() != self.input_len() {
            return Err(PipelineError::ConfigMismatch {
                component: "DenseNetwork".to_string(),
                expected: self.input_len(),
                actual: features.len(),
            });
        }

        let input: Vec<f64> = features.as_slice().iter().map(|&v| v as f64).collect();
        let output = self
            .layers
            .iter()
            .fold(input, |activations, layer| layer.forward(&activations));

        let score = output.first().copied().unwrap_or(f64::NAN) as f32;
        if !score.is_finite() {
            return Err(PipelineError::InvalidScore { score });
        }

        Ok(score.clamp(0.0, 1.0))
    }

    fn name(&self) -> &str {
        "dense_network"
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
