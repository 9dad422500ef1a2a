// Audio error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Audio error code constants
///
/// Error code range: 2001-2008
pub struct AudioErrorCodes {}

impl AudioErrorCodes {
    /// The host exposes no input-capable device
    pub const NO_INPUT_DEVICES: i32 = 2001;

    /// Operator picked a device that does not exist
    pub const INVALID_DEVICE_SELECTION: i32 = 2002;

    /// Failed to open audio stream
    pub const STREAM_OPEN_FAILED: i32 = 2003;

    /// Audio stream disconnected or reported an error mid-run
    pub const STREAM_FAILURE: i32 = 2004;

    /// Hardware or I/O error occurred
    pub const HARDWARE_ERROR: i32 = 2005;

    /// Device or file delivers samples in a format we cannot convert
    pub const UNSUPPORTED_SAMPLE_FORMAT: i32 = 2006;

    /// A frame did not have the configured length
    pub const FRAME_SIZE_MISMATCH: i32 = 2007;

    /// Replay source has no samples left
    pub const SOURCE_EXHAUSTED: i32 = 2008;
}

/// Log an audio error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_audio_error(err: &AudioError, context: &str) {
    error!(
        "Audio error in {}: code={}, component=Capture, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Audio-related errors
///
/// These errors cover device selection, stream management and the replay
/// sources that stand in for a live microphone.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioError {
    /// No input-capable device was found on the default host
    NoInputDevices,

    /// Device selection was not a listed device index
    InvalidDeviceSelection { input: String },

    /// Failed to open audio stream
    StreamOpenFailed { reason: String },

    /// Stream reported an error or its producer went away
    StreamFailure { reason: String },

    /// Hardware or I/O error occurred
    HardwareError { details: String },

    /// Sample format cannot be converted to signed 16-bit
    UnsupportedSampleFormat { format: String },

    /// Frame length differs from the configured chunk size
    FrameSizeMismatch { expected: usize, actual: usize },

    /// Replay source ran out of samples
    SourceExhausted,
}

impl ErrorCode for AudioError {
    fn code(&self) -> i32 {
        match self {
            AudioError::NoInputDevices => AudioErrorCodes::NO_INPUT_DEVICES,
            AudioError::InvalidDeviceSelection { .. } => AudioErrorCodes::INVALID_DEVICE_SELECTION,
            AudioError::StreamOpenFailed { .. } => AudioErrorCodes::STREAM_OPEN_FAILED,
            AudioError::StreamFailure { .. } => AudioErrorCodes::STREAM_FAILURE,
            AudioError::HardwareError { .. } => AudioErrorCodes::HARDWARE_ERROR,
            AudioError::UnsupportedSampleFormat { .. } => {
                AudioErrorCodes::UNSUPPORTED_SAMPLE_FORMAT
            }
            AudioError::FrameSizeMismatch { .. } => AudioErrorCodes::FRAME_SIZE_MISMATCH,
            AudioError::SourceExhausted => AudioErrorCodes::SOURCE_EXHAUSTED,
        }
    }

    fn message(&self) -> String {
        match self {
            AudioError::NoInputDevices => "No input-capable audio device found".to_string(),
            AudioError::InvalidDeviceSelection { input } => {
                format!("Invalid device selection: {:?}", input)
            }
            AudioError::StreamOpenFailed { reason } => {
                format!("Failed to open audio stream: {}", reason)
            }
            AudioError::StreamFailure { reason } => {
                format!("Audio stream failed: {}", reason)
            }
            AudioError::HardwareError { details } => {
                format!("Hardware error: {}", details)
            }
            AudioError::UnsupportedSampleFormat { format } => {
                format!("Unsupported sample format: {}", format)
            }
            AudioError::FrameSizeMismatch { expected, actual } => {
                format!("Expected a frame of {} samples, got {}", expected, actual)
            }
            AudioError::SourceExhausted => "Audio source has no samples left".to_string(),
        }
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AudioError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for AudioError {}

impl From<std::io::Error> for AudioError {
    fn from(err: std::io::Error) -> Self {
        AudioError::HardwareError {
            details: err.to_string(),
        }
    }
}
