//! Whistle navigator scenarios driven end to end

use whistle_control::analysis::NavSignal;
use whistle_control::audio::{AudioFrame, MemoryFrameSource};
use whistle_control::config::AppConfig;
use whistle_control::navigator::{NavKey, RecordingKeyInjector};
use whistle_control::session::{FrameDriver, NavigatorFrame, NavigatorSession, StopReason};
use whistle_control::testing::chirp_frames;

const CHUNK: usize = 1024;
const AMPLITUDE: f64 = 10_000.0;

fn rising() -> Vec<AudioFrame> {
    let bins: Vec<u32> = (0..10).map(|i| 15 + 2 * i).collect();
    chirp_frames(&bins, CHUNK, AMPLITUDE)
}

fn falling() -> Vec<AudioFrame> {
    let bins: Vec<u32> = (0..10).map(|i| 33 - 2 * i).collect();
    chirp_frames(&bins, CHUNK, AMPLITUDE)
}

fn run(frames: Vec<AudioFrame>) -> (Vec<NavigatorFrame>, NavigatorSession<RecordingKeyInjector>) {
    let mut session = NavigatorSession::new(&AppConfig::default(), RecordingKeyInjector::new());
    let mut reports = Vec::new();
    let summary = FrameDriver::new(None)
        .run_with(&mut MemoryFrameSource::new(frames), &mut session, |r| reports.push(*r))
        .expect("memory source never fails");
    assert_eq!(summary.reason, StopReason::SourceExhausted);
    (reports, session)
}

#[test]
fn test_rising_chirp_selects_previous_item() {
    let (reports, session) = run(rising());

    let signals: Vec<NavSignal> = reports.iter().map(|r| r.signal).collect();
    assert_eq!(&signals[..9], &[NavSignal::None; 9]);
    assert_eq!(signals[9], NavSignal::Up);
    assert_eq!(session.navigator().selected(), 2);
    assert_eq!(session.keys().events(), &[NavKey::Up]);
}

#[test]
fn test_falling_then_rising_returns_to_start() {
    let mut frames = falling();
    frames.extend(rising());
    let (reports, session) = run(frames);

    assert_eq!(reports[9].selected, 1);
    assert_eq!(reports[19].selected, 0);
    assert_eq!(session.keys().events(), &[NavKey::Down, NavKey::Up]);
    assert_eq!(session.navigator().transitions(), 2);
}

#[test]
fn test_three_falling_chirps_wrap_around() {
    let mut frames = Vec::new();
    for _ in 0..3 {
        frames.extend(falling());
    }
    let (reports, session) = run(frames);

    let selections: Vec<usize> = reports
        .iter()
        .filter(|r| r.key.is_some())
        .map(|r| r.selected)
        .collect();
    assert_eq!(selections, vec![1, 2, 0]);
    assert_eq!(session.keys().events(), &[NavKey::Down; 3]);
}

#[test]
fn test_gap_in_chirp_blocks_classification() {
    let mut frames = rising();
    frames[4] = AudioFrame::silent(CHUNK);
    let (reports, session) = run(frames);

    assert!(reports.iter().all(|r| r.signal == NavSignal::None));
    assert_eq!(session.navigator().selected(), 0);
    assert!(session.keys().events().is_empty());
}
