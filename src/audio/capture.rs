// Capture - live microphone input through CPAL
//
// The CPAL input callback runs on the host's audio thread. It converts every
// sample of the first channel to i16 and pushes it into a lock-free SPSC ring
// (rtrb). The update loop owns the consumer side and `read_frame` blocks
// until exactly `frames_per_buffer` samples have been collected, so only one
// frame is ever in flight.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::audio::frame::AudioFrame;
use crate::audio::source::{f32_to_i16, FrameSource};
use crate::config::AudioConfig;
use crate::error::AudioError;

/// Number of frames worth of samples the ring can hold
const RING_FRAMES: usize = 4;

/// How long `read_frame` sleeps while waiting for the callback
const POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Input-capable device as presented to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDeviceInfo {
    pub index: usize,
    pub name: String,
}

/// Parameters for opening a capture stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    pub sample_rate: u32,
    /// Channels delivered to the pipeline (mono only)
    pub channels: u16,
    pub frames_per_buffer: usize,
}

impl CaptureConfig {
    pub fn new(audio: &AudioConfig, frames_per_buffer: usize) -> Self {
        Self {
            sample_rate: audio.sample_rate,
            channels: audio.channels,
            frames_per_buffer,
        }
    }
}

/// Enumerate input-capable devices of the default host
pub fn list_input_devices() -> Result<Vec<InputDeviceInfo>, AudioError> {
    let host = cpal::default_host();
    let devices = host
        .input_devices()
        .map_err(|e| AudioError::HardwareError {
            details: format!("Failed to enumerate input devices: {}", e),
        })?;

    Ok(devices
        .enumerate()
        .map(|(index, device)| InputDeviceInfo {
            index,
            name: device.name().unwrap_or_else(|_| "<unnamed>".to_string()),
        })
        .collect())
}

/// Parse an operator's device choice against the listed devices
pub fn parse_device_selection(
    input: &str,
    devices: &[InputDeviceInfo],
) -> Result<usize, AudioError> {
    let trimmed = input.trim();
    let invalid = || AudioError::InvalidDeviceSelection {
        input: trimmed.to_string(),
    };

    let index: usize = trimmed.parse().map_err(|_| invalid())?;
    if devices.iter().any(|d| d.index == index) {
        Ok(index)
    } else {
        Err(invalid())
    }
}

/// Print the device list and read the operator's choice
///
/// Any answer that is not one of the listed indices is fatal.
pub fn select_device<R: BufRead, W: Write>(
    devices: &[InputDeviceInfo],
    mut reader: R,
    mut writer: W,
) -> Result<usize, AudioError> {
    if devices.is_empty() {
        return Err(AudioError::NoInputDevices);
    }

    for device in devices {
        writeln!(writer, "Input Device id {} - {}", device.index, device.name)?;
    }
    writeln!(writer, "select audio device:")?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    parse_device_selection(&line, devices)
}

/// Live microphone stream delivering fixed-size frames
pub struct CaptureStream {
    _stream: cpal::Stream,
    reader: FrameReader,
}

impl CaptureStream {
    /// Open the device at `device_index` (as listed by [`list_input_devices`])
    pub fn open(device_index: usize, config: CaptureConfig) -> Result<Self, AudioError> {
        if config.frames_per_buffer == 0 {
            return Err(AudioError::StreamOpenFailed {
                reason: "frames_per_buffer must be greater than 0".to_string(),
            });
        }
        if config.channels != 1 {
            return Err(AudioError::StreamOpenFailed {
                reason: format!("only mono capture is supported (got {} channels)", config.channels),
            });
        }

        let host = cpal::default_host();
        let device = host
            .input_devices()
            .map_err(|e| AudioError::HardwareError {
                details: format!("Failed to enumerate input devices: {}", e),
            })?
            .nth(device_index)
            .ok_or_else(|| AudioError::InvalidDeviceSelection {
                input: device_index.to_string(),
            })?;

        let default_config = device
            .default_input_config()
            .map_err(|e| AudioError::StreamOpenFailed {
                reason: format!("Failed to get default input config: {:?}", e),
            })?;

        // Keep the device's channel layout and de-interleave the first channel
        let device_channels = default_config.channels().max(1);
        let stream_config = cpal::StreamConfig {
            channels: device_channels,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let (producer, consumer) = RingBuffer::new(config.frames_per_buffer * RING_FRAMES);
        let failure = Arc::new(Mutex::new(None));
        let dropped_samples = Arc::new(AtomicU64::new(0));

        let callback = InputCallback {
            producer,
            channels: device_channels as usize,
            dropped_samples: Arc::clone(&dropped_samples),
        };
        let stream = build_stream(
            &device,
            &stream_config,
            default_config.sample_format(),
            callback,
            Arc::clone(&failure),
        )?;

        stream.play().map_err(|e| AudioError::HardwareError {
            details: format!("Input start failed: {}", e),
        })?;

        tracing::info!(
            "[Capture] Opened device {} ({} ch @ {} Hz, {} samples per frame)",
            device_index,
            device_channels,
            config.sample_rate,
            config.frames_per_buffer
        );

        Ok(Self {
            _stream: stream,
            reader: FrameReader::new(consumer, config.frames_per_buffer, failure, dropped_samples),
        })
    }
}

impl FrameSource for CaptureStream {
    fn frame_len(&self) -> usize {
        self.reader.frames_per_buffer
    }

    fn read_frame(&mut self) -> Result<AudioFrame, AudioError> {
        self.reader.read_frame()
    }

    fn rewind(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn discard_pending(&mut self) {
        let discarded = self.reader.discard_pending();
        tracing::info!("[Capture] Discarded {} buffered samples", discarded);
    }
}

/// Consumer side of the capture ring plus the state shared with the callback
struct FrameReader {
    consumer: Consumer<i16>,
    frames_per_buffer: usize,
    failure: Arc<Mutex<Option<String>>>,
    dropped_samples: Arc<AtomicU64>,
    reported_drops: u64,
}

impl FrameReader {
    fn new(
        consumer: Consumer<i16>,
        frames_per_buffer: usize,
        failure: Arc<Mutex<Option<String>>>,
        dropped_samples: Arc<AtomicU64>,
    ) -> Self {
        Self {
            consumer,
            frames_per_buffer,
            failure,
            dropped_samples,
            reported_drops: 0,
        }
    }

    /// Block until exactly `frames_per_buffer` samples have been collected
    fn read_frame(&mut self) -> Result<AudioFrame, AudioError> {
        let mut samples = Vec::with_capacity(self.frames_per_buffer);

        while samples.len() < self.frames_per_buffer {
            self.check_failure()?;

            let wanted = (self.frames_per_buffer - samples.len()).min(self.consumer.slots());
            if wanted == 0 {
                thread::sleep(POLL_INTERVAL);
                continue;
            }

            if let Ok(chunk) = self.consumer.read_chunk(wanted) {
                let (first, second) = chunk.as_slices();
                samples.extend_from_slice(first);
                samples.extend_from_slice(second);
                chunk.commit_all();
            }
        }

        self.report_drops();
        Ok(AudioFrame::new(samples))
    }

    /// Drop everything buffered so far and reset the drop counter
    ///
    /// Returns the number of samples discarded.
    fn discard_pending(&mut self) -> usize {
        let pending = self.consumer.slots();
        if let Ok(chunk) = self.consumer.read_chunk(pending) {
            chunk.commit_all();
        }
        self.dropped_samples.store(0, Ordering::Relaxed);
        self.reported_drops = 0;
        pending
    }

    fn check_failure(&self) -> Result<(), AudioError> {
        let guard = self.failure.lock().map_err(|_| AudioError::StreamFailure {
            reason: "stream error slot poisoned".to_string(),
        })?;
        match guard.as_ref() {
            Some(reason) => Err(AudioError::StreamFailure {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn report_drops(&mut self) {
        let dropped = self.dropped_samples.load(Ordering::Relaxed);
        if dropped > self.reported_drops {
            tracing::warn!(
                "[Capture] Ring full, {} samples dropped so far",
                dropped
            );
            self.reported_drops = dropped;
        }
    }
}

/// State moved into the CPAL data callback
struct InputCallback {
    producer: Producer<i16>,
    channels: usize,
    dropped_samples: Arc<AtomicU64>,
}

impl InputCallback {
    fn push_interleaved<T: Copy>(&mut self, data: &[T], convert: impl Fn(T) -> i16) {
        for frame in data.chunks(self.channels) {
            let sample = frame.first().copied().map(&convert).unwrap_or(0);
            if self.producer.push(sample).is_err() {
                self.dropped_samples.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

fn build_stream(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    format: cpal::SampleFormat,
    mut callback: InputCallback,
    failure: Arc<Mutex<Option<String>>>,
) -> Result<cpal::Stream, AudioError> {
    let err_fn = move |err: cpal::StreamError| {
        tracing::error!("[Capture] Input stream error: {}", err);
        if let Ok(mut slot) = failure.lock() {
            slot.get_or_insert_with(|| err.to_string());
        }
    };

    let stream = match format {
        cpal::SampleFormat::I16 => device.build_input_stream(
            config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| {
                callback.push_interleaved(data, |s| s)
            },
            err_fn,
            None,
        ),
        cpal::SampleFormat::U16 => device.build_input_stream(
            config,
            move |data: &[u16], _: &cpal::InputCallbackInfo| {
                callback.push_interleaved(data, |s| (s as i32 - 32_768) as i16)
            },
            err_fn,
            None,
        ),
        cpal::SampleFormat::F32 => device.build_input_stream(
            config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                callback.push_interleaved(data, f32_to_i16)
            },
            err_fn,
            None,
        ),
        other => {
            return Err(AudioError::UnsupportedSampleFormat {
                format: format!("{:?}", other),
            })
        }
    }
    .map_err(|e| AudioError::StreamOpenFailed {
        reason: format!("{:?}", e),
    })?;

    Ok(stream)
}
