use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::HeaderName;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use crate::analysis::DetectionPipeline;
use crate::api::{self, ErrorResponse, RequestError, SuccessResponse, VoiceRequest};
use crate::error::{log_pipeline_error, PipelineError};

static X_API_KEY: HeaderName = HeaderName::from_static("x-api-key");

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<DetectionPipeline>,
    api_key: Arc<String>,
}

impl AppState {
    pub fn new(pipeline: Arc<DetectionPipeline>, api_key: String) -> Self {
        Self {
            pipeline,
            api_key: Arc::new(api_key),
        }
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), HttpServerError> {
        let provided = headers
            .get(&X_API_KEY)
            .and_then(|value| value.to_str().ok());
        match provided {
            Some(value) if !value.is_empty() && value == self.api_key.as_str() => Ok(()),
            _ => Err(HttpServerError::Unauthorized),
        }
    }
}

/// HTTP error variants mapped to `{"status": "error", "message": ...}`.
#[derive(Debug)]
pub enum HttpServerError {
    Unauthorized,
    /// Body could not be read or parsed as JSON
    Rejected(StatusCode, String),
    Request(RequestError),
}

impl HttpServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Rejected(status, _) => *status,
            Self::Request(RequestError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Request(RequestError::Pipeline(err)) if err.is_decode() => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Request(RequestError::Pipeline(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RequestError> for HttpServerError {
    fn from(err: RequestError) -> Self {
        Self::Request(err)
    }
}

impl IntoResponse for HttpServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Unauthorized => "Invalid API key".to_string(),
            Self::Rejected(_, msg) => msg,
            Self::Request(err) => err.public_message(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Health endpoint response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub feature_len: usize,
}

/// Build the Axum router with all handlers.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/voice-detection", post(voice_detection))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

/// Run the HTTP server loop until `shutdown` resolves.
pub async fn run_http_server<F>(
    state: AppState,
    addr: SocketAddr,
    max_body_bytes: usize,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding HTTP listener on {}", addr))?;
    log::info!("Voice detection API listening on {}", addr);

    let router = build_router(state, max_body_bytes);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("serving HTTP router")?;
    Ok(())
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        feature_len: state.pipeline.feature_len(),
    })
}

pub async fn voice_detection(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<VoiceRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, HttpServerError> {
    state.authorize(&headers)?;

    let Json(request) =
        payload.map_err(|rejection| HttpServerError::Rejected(rejection.status(), rejection.body_text()))?;

    // Decoding and DSP are CPU bound
    let pipeline = Arc::clone(&state.pipeline);
    let outcome = tokio::task::spawn_blocking(move || api::detect(&pipeline, &request))
        .await
        .map_err(|err| {
            RequestError::Pipeline(PipelineError::Internal {
                details: format!("detection task failed: {}", err),
            })
        })
        .and_then(|result| result);

    match outcome {
        Ok(response) => {
            log::info!(
                "Classified request: label={}, confidence={}",
                response.classification,
                response.confidence_score
            );
            Ok(Json(response))
        }
        Err(err) => {
            match &err {
                RequestError::Validation(validation) => {
                    log::warn!("Rejected request: {}", validation)
                }
                RequestError::Pipeline(pipeline_err) => {
                    log_pipeline_error(pipeline_err, "voice_detection")
                }
            }
            Err(err.into())
        }
    }
}
