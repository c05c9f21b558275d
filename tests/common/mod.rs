#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use voice_authenticity::config::ArtifactConfig;

/// Write a single-unit logistic model over `width` features
///
/// Only the pitch-std input (index `width - 3`) carries weight, so steady
/// tones score as synthetic and wobbly ones as human.
pub fn write_artifacts(dir: &Path, width: usize) -> ArtifactConfig {
    let pitch_std_index = width - 3;
    let rows: Vec<String> = (0..width)
        .map(|i| if i == pitch_std_index { "[-0.5]".to_string() } else { "[0.0]".to_string() })
        .collect();
    let model = format!(
        r#"{{"layers": [{{"weights": [{}], "bias": [10.0], "activation": "sigmoid"}}]}}"#,
        rows.join(",")
    );
    let scaler = format!(
        r#"{{"mean": [{}], "scale": [{}]}}"#,
        vec!["0.0"; width].join(","),
        vec!["1.0"; width].join(",")
    );

    let model_path = dir.join("model.json");
    let scaler_path = dir.join("scaler.json");
    fs::write(&model_path, model).expect("write model");
    fs::write(&scaler_path, scaler).expect("write scaler");

    ArtifactConfig {
        model_path,
        scaler_path,
    }
}

/// Write raw bytes into `dir/name`
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).expect("write file");
    path
}
