// Model artifacts - loading the trained scaler and network
//
// Both artifacts are JSON documents indexed in feature-vector order:
//
//   scaler.json  {"mean": [f32; W], "scale": [f32; W]}
//   model.json   {"layers": [{"weights": [[f32; out]; in], "bias": [f32; out],
//                             "activation": "relu" | "sigmoid" | ...}, ...]}
//
// They are read once at startup; a width that disagrees with the configured
// feature extractor fails startup rather than individual requests.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;

use crate::analysis::{Classifier, DenseNetwork, DetectionPipeline, FeatureScaler};
use crate::config::{AppConfig, ArtifactConfig};

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {} {}", what, path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {} {}", what, path.display()))
}

/// Load scaler constants from JSON
pub fn load_scaler(path: &Path) -> Result<FeatureScaler> {
    read_json(path, "scaler")
}

/// Load a dense network from JSON
pub fn load_network(path: &Path) -> Result<DenseNetwork> {
    read_json(path, "model")
}

/// Trained artifacts loaded from disk
pub struct ModelArtifacts {
    pub scaler: FeatureScaler,
    pub classifier: Arc<dyn Classifier>,
}

impl ModelArtifacts {
    /// Load the scaler and model named by the artifact configuration
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        let scaler = load_scaler(&config.scaler_path)?;
        let network = load_network(&config.model_path)?;

        if scaler.input_len() != network.input_len() {
            return Err(anyhow!(
                "scaler {} expects {} features but model {} expects {}",
                config.scaler_path.display(),
                scaler.input_len(),
                config.model_path.display(),
                network.input_len()
            ));
        }

        log::info!(
            "[Model] Loaded {} ({} layers) and {}",
            config.model_path.display(),
            network.layers().len(),
            config.scaler_path.display()
        );

        Ok(Self {
            scaler,
            classifier: Arc::new(network),
        })
    }

    /// Build a detection pipeline around these artifacts
    pub fn into_pipeline(self, config: &AppConfig) -> Result<DetectionPipeline> {
        DetectionPipeline::new(config, self.scaler, self.classifier)
            .map_err(|err| anyhow!("model artifacts do not fit the feature configuration: {}", err))
    }
}
