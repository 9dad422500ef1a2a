use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use whistle_control::testing::tone_frame;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_whistle_cli"))
}

fn temp_wav(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("whistle_cli_{}_{}.wav", std::process::id(), name))
}

fn write_wav(path: &Path, frames: &[Vec<i16>]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    for sample in frames.iter().flatten() {
        writer.write_sample(*sample).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}

fn report(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "CLI exited with {:?}: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout.clone()).expect("stdout UTF-8");
    serde_json::from_str(stdout.trim()).expect("report JSON payload")
}

/// 39 silent frames, then 216 for as long as the first note spans the player
fn karaoke_wav(name: &str) -> PathBuf {
    let mut frames = vec![vec![0i16; 8192]; 39];
    frames.extend(std::iter::repeat(tone_frame(216, 8192, 8000.0)).take(21));
    let path = temp_wav(name);
    write_wav(&path, &frames);
    path
}

#[test]
fn karaoke_replay_reports_score() {
    let path = karaoke_wav("karaoke_full");
    let output = cli()
        .args(["karaoke", "--wav"])
        .arg(&path)
        .output()
        .expect("failed to run whistle_cli karaoke");
    let json = report(&output);

    assert_eq!(json["score"], 210);
    assert_eq!(json["frames"], 60);
    assert_eq!(json["state"], "Start");
    assert_eq!(json["stop_reason"], "SourceExhausted");
    let _ = std::fs::remove_file(path);
}

#[test]
fn karaoke_frame_limit_is_honoured() {
    let path = karaoke_wav("karaoke_limit");
    let output = cli()
        .args(["karaoke", "--frames", "41", "--wav"])
        .arg(&path)
        .output()
        .expect("failed to run whistle_cli karaoke");
    let json = report(&output);

    assert_eq!(json["frames"], 41);
    assert_eq!(json["score"], 20);
    assert_eq!(json["stop_reason"], "FrameLimit");
    let _ = std::fs::remove_file(path);
}

#[test]
fn navigate_replay_reports_selection() {
    let frames: Vec<Vec<i16>> = (0..10).map(|i| tone_frame(15 + 2 * i, 1024, 10_000.0)).collect();
    let path = temp_wav("navigate_rising");
    write_wav(&path, &frames);

    let output = cli()
        .args(["navigate", "--wav"])
        .arg(&path)
        .output()
        .expect("failed to run whistle_cli navigate");
    let json = report(&output);

    assert_eq!(json["selected"], 2);
    assert_eq!(json["frames"], 10);
    assert_eq!(json["transitions"], 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("selected item 2"), "got {stderr}");
    let _ = std::fs::remove_file(path);
}

#[test]
fn missing_replay_file_fails() {
    let output = cli()
        .args(["karaoke", "--wav", "does/not/exist.wav"])
        .output()
        .expect("failed to run whistle_cli karaoke");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "got {stderr}");
}
