// Error types for the whistle control pipeline
//
// This module defines custom error types for audio capture and frame
// sources, providing structured error handling with numeric codes that the
// CLI can surface to the operator.

mod audio;

pub use audio::{log_audio_error, AudioError, AudioErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
