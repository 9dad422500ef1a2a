// Audio module - frame acquisition from the microphone or replay sources

pub mod capture;
pub mod frame;
pub mod source;

// Re-export commonly used types for convenience
pub use capture::{
    list_input_devices, parse_device_selection, select_device, CaptureConfig, CaptureStream,
    InputDeviceInfo,
};
pub use frame::AudioFrame;
pub use source::{FrameSource, MemoryFrameSource, WavFrameSource};
