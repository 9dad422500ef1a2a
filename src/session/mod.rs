// Session module - per-application state driven one frame at a time
//
// Each application keeps its whole mutable state in one session object that
// the driver steps once per captured frame.

pub mod driver;
pub mod karaoke;
pub mod navigator;

pub use driver::{FrameDriver, RunSummary, StopReason};
pub use karaoke::KaraokeSession;
pub use navigator::{NavigatorFrame, NavigatorSession};

use crate::audio::AudioFrame;

/// Trait implemented by the application sessions the driver can run.
pub trait Session {
    /// Per-frame report handed back to the caller
    type Report;

    /// Samples expected per frame
    fn frame_len(&self) -> usize;

    /// Process one frame
    fn step(&mut self, frame: &AudioFrame) -> Self::Report;

    /// The driver stops reading audio once this returns true
    fn is_finished(&self) -> bool {
        false
    }
}
