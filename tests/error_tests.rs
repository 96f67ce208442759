//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;

const STREAM_URL: &str = "http://stream.example/live.mp3";

fn radio_recorder_bin(config_home: &str) -> Command {
    let mut cmd = Command::cargo_bin("radio-recorder").expect("binary should be built");
    cmd.env("HOME", config_home)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("FFMPEG_PATH");
    cmd
}

#[test]
fn missing_start_is_usage_error() {
    radio_recorder_bin("/nonexistent")
        .args(["--end", "21:00", "--url", STREAM_URL])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--start"));
}

#[test]
fn missing_url_is_usage_error() {
    radio_recorder_bin("/nonexistent")
        .args(["--start", "19:00", "--end", "21:00"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--url"));
}

#[test]
fn malformed_time_is_usage_error() {
    radio_recorder_bin("/nonexistent")
        .args(["-s", "7pm", "-e", "21:00", "-u", STREAM_URL])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("7pm"));
}

#[test]
fn empty_window_is_usage_error() {
    radio_recorder_bin("/nonexistent")
        .args(["-s", "19:00", "-e", "19:00", "-u", STREAM_URL])
        .assert()
        .code(2);
}

#[test]
fn unknown_timezone_is_usage_error() {
    radio_recorder_bin("/nonexistent")
        .args(["-s", "19:00", "-e", "21:00", "-u", STREAM_URL])
        .args(["--timezone", "Mars/Olympus_Mons"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Mars/Olympus_Mons"));
}

#[test]
fn invalid_record_duration_is_usage_error() {
    radio_recorder_bin("/nonexistent")
        .args(["record", "--duration", "soon", "--url", STREAM_URL])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("soon"));
}

#[test]
fn record_with_missing_ffmpeg_fails() {
    let dir = tempfile::tempdir().unwrap();
    radio_recorder_bin("/nonexistent")
        .args(["record", "--duration", "1s", "--url", STREAM_URL])
        .arg("--output")
        .arg(dir.path())
        .args(["--ffmpeg", "/nonexistent/ffmpeg"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FFmpeg"));
}

/// Stand-in for FFmpeg: writes the output file once interrupted
#[cfg(unix)]
const FINALIZING_SCRIPT: &str = r#"#!/bin/sh
for arg in "$@"; do out="$arg"; done
trap 'echo finalized > "$out"; exit 0' INT
while true; do sleep 0.1; done
"#;

#[cfg(unix)]
const FAILING_SCRIPT: &str = r#"#!/bin/sh
echo "http://stream.example/live.mp3: Connection refused" >&2
exit 1
"#;

#[cfg(unix)]
fn write_script(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("ffmpeg");
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn record_exits_zero_once_capture_is_finalized() {
    let scripts = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let ffmpeg = write_script(scripts.path(), FINALIZING_SCRIPT);

    radio_recorder_bin("/nonexistent")
        .args(["record", "--duration", "1s", "--url", STREAM_URL])
        .arg("--output")
        .arg(output.path())
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stderr(predicate::str::contains("Recording saved as"));

    let files: Vec<_> = std::fs::read_dir(output.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("radio_show_") && name.ends_with(".mp3"));
    assert_eq!(std::fs::read_to_string(&files[0]).unwrap().trim(), "finalized");
}

#[cfg(unix)]
#[test]
fn record_exits_one_when_capture_fails_early() {
    let scripts = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let ffmpeg = write_script(scripts.path(), FAILING_SCRIPT);

    // The early exit ends the wait long before the minute is up
    radio_recorder_bin("/nonexistent")
        .args(["record", "--duration", "1m", "--url", STREAM_URL])
        .arg("--output")
        .arg(output.path())
        .arg("--ffmpeg")
        .arg(&ffmpeg)
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Connection refused"));
}

#[test]
fn config_get_unknown_key() {
    radio_recorder_bin("/nonexistent")
        .args(["config", "get", "unknown_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    radio_recorder_bin(dir.path().to_str().unwrap())
        .args(["config", "set", "unknown_key", "value"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid keys"));
}

#[test]
fn config_set_invalid_time() {
    let dir = tempfile::tempdir().unwrap();
    radio_recorder_bin(dir.path().to_str().unwrap())
        .args(["config", "set", "start", "25:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start"));
}

#[test]
fn config_set_then_get_roundtrips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().to_str().unwrap();

    radio_recorder_bin(home)
        .args(["config", "set", "weekday", "friday"])
        .assert()
        .success();

    radio_recorder_bin(home)
        .args(["config", "get", "weekday"])
        .assert()
        .success()
        .stdout(predicate::str::diff("friday\n"));

    radio_recorder_bin(home)
        .args(["config", "get", "url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not set)"));
}
