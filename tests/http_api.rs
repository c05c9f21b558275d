//! HTTP API tests driving the router in-process.

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tower::ServiceExt;
use voice_authenticity::config::AppConfig;
use voice_authenticity::http::{build_router, AppState};
use voice_authenticity::model::ModelArtifacts;
use voice_authenticity::testing::{mp3, synth};

const KEY: &str = "integration-key";

fn make_router() -> (tempfile::TempDir, Router) {
    let config = AppConfig::default();
    let dir = tempfile::tempdir().expect("tempdir");
    let artifacts = common::write_artifacts(dir.path(), config.features.feature_len());
    let pipeline = ModelArtifacts::load(&artifacts)
        .expect("artifacts")
        .into_pipeline(&config)
        .expect("pipeline");

    let state = AppState::new(Arc::new(pipeline), KEY.to_string());
    (dir, build_router(state, config.server.max_body_bytes))
}

async fn call(router: Router, key: Option<&str>, body: Value) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/voice-detection")
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request");

    let response: Response = router.oneshot(request).await.expect("router call");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    let json = serde_json::from_slice::<Value>(&bytes).expect("JSON body");
    (status, json)
}

fn tone_base64() -> String {
    let tone = synth::sine(16_000, 300.0, 1.0, 0.5);
    STANDARD.encode(synth::encode_wav(&tone, 16_000))
}

#[tokio::test]
async fn successful_detection_response_shape() {
    let (_dir, router) = make_router();
    let (status, json) = call(
        router,
        Some(KEY),
        json!({"language": "english", "audioFormat": "mp3", "audioBase64": tone_base64()}),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "body: {json}");
    assert_eq!(json["status"], "success");
    assert_eq!(json["language"], "English");
    assert_eq!(json["classification"], "AI_GENERATED");
    let confidence = json["confidenceScore"].as_f64().expect("confidence");
    assert!((0.5..=1.0).contains(&confidence));
    assert!(json["explanation"]
        .as_str()
        .expect("explanation")
        .ends_with("commonly observed in synthetic voices."));
    assert!(json.get("probability").is_none());
}

#[tokio::test]
async fn mp3_payload_is_classified() {
    let (_dir, router) = make_router();
    let audio = STANDARD.encode(mp3::tone(40, 26));
    let (status, json) = call(
        router,
        Some(KEY),
        json!({"language": "Tamil", "audioFormat": "mp3", "audioBase64": audio}),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "body: {json}");
    assert_eq!(json["status"], "success");
    assert_eq!(json["language"], "Tamil");
    let label = json["classification"].as_str().expect("classification");
    assert!(label == "AI_GENERATED" || label == "HUMAN", "label: {label}");
    let confidence = json["confidenceScore"].as_f64().expect("confidence");
    assert!((0.5..=1.0).contains(&confidence));
}

#[tokio::test]
async fn silent_mp3_is_unprocessable() {
    let (_dir, router) = make_router();
    let audio = STANDARD.encode(mp3::silence(40));
    let (status, json) = call(
        router,
        Some(KEY),
        json!({"language": "Hindi", "audioFormat": "mp3", "audioBase64": audio}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Unable to process audio data");
}

#[tokio::test]
async fn language_is_omitted_when_not_given() {
    let (_dir, router) = make_router();
    let (status, json) = call(
        router,
        Some(KEY),
        json!({"audioFormat": "mp3", "audioBase64": tone_base64()}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.get("language").is_none());
}

#[tokio::test]
async fn validation_messages() {
    let cases = [
        (
            json!({"language": "german", "audioFormat": "mp3", "audioBase64": "AAAA"}),
            "Unsupported language",
        ),
        (
            json!({"language": "Hindi", "audioFormat": "wav", "audioBase64": "AAAA"}),
            "Only mp3 audio is supported",
        ),
        (
            json!({"language": "Hindi", "audioFormat": "mp3"}),
            "Missing audio data",
        ),
        (
            json!({"language": "Hindi", "audioFormat": "mp3", "audioBase64": ""}),
            "Missing audio data",
        ),
    ];

    for (body, message) in cases {
        let (_dir, router) = make_router();
        let (status, json) = call(router, Some(KEY), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], message);
    }
}

#[tokio::test]
async fn silence_only_audio_is_structured_error() {
    let (_dir, router) = make_router();
    let silence = STANDARD.encode(synth::encode_wav(&vec![0.0; 16_000], 16_000));
    let (status, json) = call(
        router,
        Some(KEY),
        json!({"language": "Malayalam", "audioFormat": "mp3", "audioBase64": silence}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Unable to process audio data");
}

#[tokio::test]
async fn wrong_key_is_rejected() {
    let (_dir, router) = make_router();
    let (status, json) = call(
        router,
        Some("nope"),
        json!({"language": "english", "audioFormat": "mp3", "audioBase64": tone_base64()}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid API key");
}
