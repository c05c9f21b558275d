mod common;

use std::process::Command;

use serde_json::Value;
use voice_authenticity::testing::synth;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_voice_detect_cli"))
}

#[test]
fn features_dumps_vector_and_statistics() {
    let dir = tempfile::tempdir().expect("tempdir");
    let audio = common::write_file(
        dir.path(),
        "tone.wav",
        &synth::encode_wav(&synth::sine(16_000, 300.0, 1.0, 0.5), 16_000),
    );

    let output = cli()
        .args(["features", "--audio"])
        .arg(&audio)
        .output()
        .expect("failed to run voice_detect_cli features");
    assert!(
        output.status.success(),
        "CLI exited with {:?}",
        output.status.code()
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    let json: Value = serde_json::from_str(stdout.trim()).expect("feature dump JSON");
    assert_eq!(json["features"].as_array().map(Vec::len), Some(82));
    assert!(json["statistics"]["pitch_mean"].as_f64().unwrap_or_default() > 250.0);
}

#[test]
fn classify_prints_api_response() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifacts = common::write_artifacts(dir.path(), 82);
    let audio = common::write_file(
        dir.path(),
        "clip.mp3",
        &synth::encode_wav(&synth::sine(16_000, 300.0, 1.0, 0.5), 16_000),
    );

    let output = cli()
        .args(["classify", "--language", "telugu", "--audio"])
        .arg(&audio)
        .arg("--model")
        .arg(&artifacts.model_path)
        .arg("--scaler")
        .arg(&artifacts.scaler_path)
        .output()
        .expect("failed to run voice_detect_cli classify");
    assert!(
        output.status.success(),
        "CLI exited with {:?}: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    let json: Value = serde_json::from_str(stdout.trim()).expect("response JSON");
    assert_eq!(json["status"], "success");
    assert_eq!(json["language"], "Telugu");
    assert_eq!(json["classification"], "AI_GENERATED");
}

#[test]
fn classify_reports_decode_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifacts = common::write_artifacts(dir.path(), 82);
    let audio = common::write_file(dir.path(), "broken.mp3", b"this is not audio at all");

    let output = cli()
        .args(["classify", "--audio"])
        .arg(&audio)
        .arg("--model")
        .arg(&artifacts.model_path)
        .arg("--scaler")
        .arg(&artifacts.scaler_path)
        .output()
        .expect("failed to run voice_detect_cli classify");
    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    let json: Value = serde_json::from_str(stdout.trim()).expect("error JSON");
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Unable to process audio data");
}
