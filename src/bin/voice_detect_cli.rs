use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Parser, Subcommand};
use serde::Serialize;
use voice_authenticity::analysis::{FeatureExtractor, FeatureVector, Statistics};
use voice_authenticity::api::{self, ErrorResponse, VoiceRequest, SUPPORTED_FORMAT};
use voice_authenticity::audio::AudioLoader;
use voice_authenticity::config::{AppConfig, DEFAULT_CONFIG_PATH};
use voice_authenticity::model::ModelArtifacts;

#[derive(Parser, Debug)]
#[command(
    name = "voice_detect_cli",
    about = "Offline voice authenticity detection and feature dumps"
)]
struct Cli {
    /// JSON configuration file (defaults to assets/config.json)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify an audio file and print the API response JSON
    Classify {
        #[arg(long)]
        audio: PathBuf,
        /// Language tag echoed in the response
        #[arg(long)]
        language: Option<String>,
        /// Declared audio format
        #[arg(long, default_value = SUPPORTED_FORMAT)]
        format: String,
        /// Model JSON (overrides the configured path)
        #[arg(long)]
        model: Option<PathBuf>,
        /// Scaler JSON (overrides the configured path)
        #[arg(long)]
        scaler: Option<PathBuf>,
    },
    /// Print the raw feature vector and statistics of an audio file
    Features {
        #[arg(long)]
        audio: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct FeatureDump {
    source: String,
    duration_secs: f32,
    features: FeatureVector,
    statistics: Statistics,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    voice_authenticity::init_logging();

    let mut config = AppConfig::load_from_file(
        cli.config
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
    );

    match cli.command {
        Commands::Classify {
            audio,
            language,
            format,
            model,
            scaler,
        } => {
            if let Some(model) = model {
                config.artifacts.model_path = model;
            }
            if let Some(scaler) = scaler {
                config.artifacts.scaler_path = scaler;
            }
            classify(&config, audio, language, format)
        }
        Commands::Features { audio, output } => features(&config, audio, output),
    }
}

fn classify(
    config: &AppConfig,
    audio: PathBuf,
    language: Option<String>,
    format: String,
) -> Result<ExitCode> {
    let pipeline = ModelArtifacts::load(&config.artifacts)?.into_pipeline(config)?;
    let bytes = fs::read(&audio).with_context(|| format!("reading {}", audio.display()))?;

    let request = VoiceRequest {
        language,
        audio_format: Some(format),
        audio_base64: Some(STANDARD.encode(bytes)),
    };

    match api::detect(&pipeline, &request) {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            log::error!("Detection failed for {}: {}", audio.display(), err);
            let body = ErrorResponse::new(err.public_message());
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(ExitCode::from(2))
        }
    }
}

fn features(config: &AppConfig, audio: PathBuf, output: Option<PathBuf>) -> Result<ExitCode> {
    let bytes = fs::read(&audio).with_context(|| format!("reading {}", audio.display()))?;
    let extension = audio
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or(SUPPORTED_FORMAT)
        .to_ascii_lowercase();

    let loader = AudioLoader::new(&config.features, &config.decode);
    let extractor = FeatureExtractor::new(&config.features);

    let waveform = loader
        .load(&bytes, &extension)
        .with_context(|| format!("decoding {}", audio.display()))?;
    let (features, statistics) = extractor.extract(&waveform)?;

    let dump = FeatureDump {
        source: audio.display().to_string(),
        duration_secs: waveform.duration_secs(),
        features,
        statistics,
    };
    let json = serde_json::to_string_pretty(&dump)?;

    match output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote {} features to {}", dump.features.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(ExitCode::SUCCESS)
}
