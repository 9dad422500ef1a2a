// Whistle Control Core - pitch-driven karaoke game and list navigator
// Frame-synchronous DSP pipeline: capture -> frequency proxy -> application state

// Module declarations
pub mod analysis;
pub mod audio;
pub mod config;
pub mod error;
pub mod karaoke;
pub mod navigator;
pub mod session;
pub mod testing;

// Re-exports for convenience
pub use analysis::{FrequencyEstimator, FrequencyProxy, NavSignal};
pub use config::AppConfig;
pub use error::{AudioError, ErrorCode};
pub use session::{FrameDriver, KaraokeSession, NavigatorSession, RunSummary, Session, StopReason};
