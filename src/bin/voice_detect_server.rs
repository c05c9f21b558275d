use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use voice_authenticity::config::{AppConfig, DEFAULT_CONFIG_PATH};
use voice_authenticity::http::{self, AppState};
use voice_authenticity::model::ModelArtifacts;

#[derive(Parser, Debug)]
#[command(
    name = "voice_detect_server",
    about = "HTTP API classifying speech recordings as AI-generated or human"
)]
struct Cli {
    /// JSON configuration file (defaults to assets/config.json)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the bind address, e.g. 127.0.0.1:8000
    #[arg(long)]
    bind: Option<String>,
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
    config.apply_env_overrides();
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }

    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {:?}", config.server.bind_addr))?;

    config.server.validate().context("invalid server configuration")?;
    if config.server.api_key == voice_authenticity::config::ServerConfig::default().api_key {
        tracing::warn!("Using the placeholder API key; set VOICE_API_KEY in production");
    }

    let pipeline = ModelArtifacts::load(&config.artifacts)
        .context("loading model artifacts")?
        .into_pipeline(&config)?;
    let state = AppState::new(Arc::new(pipeline), config.server.api_key.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    tracing::info!(
        bind = %addr,
        max_body_bytes = config.server.max_body_bytes,
        "Starting voice detection server"
    );

    runtime.block_on(http::run_http_server(
        state,
        addr,
        config.server.max_body_bytes,
        http::shutdown_signal(),
    ))?;

    tracing::info!("Server stopped");
    Ok(ExitCode::SUCCESS)
}
