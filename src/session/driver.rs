// FrameDriver - synchronous "pull one frame, then update" loop

use serde::Serialize;

use crate::audio::FrameSource;
use crate::error::AudioError;
use crate::session::Session;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// The requested number of frames was processed
    FrameLimit,
    /// The session reported it has nothing left to do
    SessionFinished,
    /// A replay source ran out of samples
    SourceExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub reason: StopReason,
}

/// Drives a session from a frame source
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameDriver {
    limit: Option<u64>,
}

impl FrameDriver {
    /// Driver that stops after `limit` frames (or never, for `None`)
    pub fn new(limit: Option<u64>) -> Self {
        Self { limit }
    }

    /// Run until the limit, the session finishing, or the source draining
    pub fn run<F, S>(&self, source: &mut F, session: &mut S) -> Result<RunSummary, AudioError>
    where
        F: FrameSource + ?Sized,
        S: Session,
    {
        self.run_with(source, session, |_| {})
    }

    /// Same as [`run`](Self::run), handing every report to `on_report`
    pub fn run_with<F, S, R>(
        &self,
        source: &mut F,
        session: &mut S,
        mut on_report: R,
    ) -> Result<RunSummary, AudioError>
    where
        F: FrameSource + ?Sized,
        S: Session,
        R: FnMut(&S::Report),
    {
        let mut frames = 0u64;

        let reason = loop {
            if session.is_finished() {
                break StopReason::SessionFinished;
            }
            if self.limit.map_or(false, |limit| frames >= limit) {
                break StopReason::FrameLimit;
            }

            let frame = match source.read_frame() {
                Ok(frame) => frame,
                Err(AudioError::SourceExhausted) => break StopReason::SourceExhausted,
                Err(err) => return Err(err),
            };
            if frame.len() != session.frame_len() {
                return Err(AudioError::FrameSizeMismatch {
                    expected: session.frame_len(),
                    actual: frame.len(),
                });
            }

            let report = session.step(&frame);
            on_report(&report);
            frames += 1;
        };

        tracing::info!("[Driver] Stopped after {} frames: {:?}", frames, reason);
        Ok(RunSummary { frames, reason })
    }
}
