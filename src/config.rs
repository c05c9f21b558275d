//! Configuration management for the detection service
//!
//! This module provides runtime configuration loading from JSON files so the
//! service, DSP parameters and artifact locations can be adjusted without
//! recompilation. Every section has defaults matching the parameters the
//! classifier artifacts were trained with.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file read by `AppConfig::load`
pub const DEFAULT_CONFIG_PATH: &str = "assets/config.json";

/// Environment variable overriding `server.api_key`
pub const API_KEY_ENV: &str = "VOICE_API_KEY";

/// Environment variable overriding `server.bind_addr`
pub const BIND_ADDR_ENV: &str = "VOICE_BIND_ADDR";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub features: FeatureConfig,
    pub explanation: ExplanationThresholds,
    pub artifacts: ArtifactConfig,
    pub decode: DecodeConfig,
}

/// HTTP server parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind
    pub bind_addr: String,
    /// Static key expected in the `x-api-key` header
    pub api_key: String,
    /// Maximum accepted request body in bytes (base64 payload included)
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            api_key: "YOUR_API_KEY".to_string(),
            max_body_bytes: 20 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Reject an empty `api_key` or a zero body limit
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("server.api_key must not be empty (set it in the config or {API_KEY_ENV})");
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("server.max_body_bytes must be positive");
        }
        Ok(())
    }
}

/// Feature extraction parameters
///
/// Changing any of these invalidates trained artifacts; `n_mfcc` also fixes
/// the feature width (`6 * n_mfcc + 4`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Analysis sample rate in Hz
    pub sample_rate: u32,
    /// Number of cepstral coefficients per frame
    pub n_mfcc: usize,
    /// STFT size in samples
    pub n_fft: usize,
    /// STFT hop in samples
    pub hop_length: usize,
    /// Mel bands feeding the DCT
    pub n_mels: usize,
    /// Delta regression window (odd)
    pub delta_width: usize,
    /// Silence trimming threshold in dB below peak
    pub top_db: f32,
    /// Lowest pitch candidate in Hz
    pub pitch_fmin: f32,
    /// Highest pitch candidate in Hz (exclusive)
    pub pitch_fmax: f32,
    /// Pitch peaks must exceed this fraction of the frame maximum
    pub pitch_threshold: f32,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            n_mfcc: 13,
            n_fft: 2048,
            hop_length: 512,
            n_mels: 128,
            delta_width: 9,
            top_db: 25.0,
            pitch_fmin: 150.0,
            pitch_fmax: 4000.0,
            pitch_threshold: 0.1,
        }
    }
}

impl FeatureConfig {
    /// Width of the feature vector produced with this configuration
    pub fn feature_len(&self) -> usize {
        crate::analysis::features::feature_len(self.n_mfcc)
    }
}

/// Thresholds used to narrate a decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationThresholds {
    /// Below this pitch standard deviation (Hz): "low pitch variation"
    pub pitch_std: f32,
    /// Below this jitter: "unnaturally stable pitch"
    pub jitter: f32,
    /// Below this shimmer: "low amplitude variation"
    pub shimmer: f32,
}

impl Default for ExplanationThresholds {
    fn default() -> Self {
        Self {
            pitch_std: 15.0,
            jitter: 0.02,
            shimmer: 0.03,
        }
    }
}

/// Locations of the trained artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("assets/voice_authenticity_model.json"),
            scaler_path: PathBuf::from("assets/scaler.json"),
        }
    }
}

/// Where the decoder reads the audio bytes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StagingMode {
    /// Decode straight from the request buffer
    #[default]
    Memory,
    /// Write the bytes to a temporary file first (removed on drop)
    TempFile,
}

/// Decoder settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    pub staging: StagingMode,
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The loaded configuration, or the defaults if the file is missing or
    /// its JSON is invalid.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load the default config file and apply environment overrides
    pub fn load() -> Self {
        let mut config = Self::load_from_file(DEFAULT_CONFIG_PATH);
        config.apply_env_overrides();
        config
    }

    /// Override selected fields from `VOICE_API_KEY` / `VOICE_BIND_ADDR`
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.server.api_key = key;
            }
        }
        if let Ok(addr) = std::env::var(BIND_ADDR_ENV) {
            if !addr.is_empty() {
                self.server.bind_addr = addr;
            }
        }
    }
}
