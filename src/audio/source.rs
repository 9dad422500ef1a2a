//! Frame sources that feed the per-frame update loop.
//!
//! Live capture and the replay sources share one contract: `read_frame`
//! blocks until exactly one frame of `frame_len()` samples is available.
//! Replay sources let the whole pipeline run deterministically without
//! touching audio hardware.

use std::path::Path;

use crate::audio::frame::AudioFrame;
use crate::error::AudioError;

/// Trait implemented by anything that can deliver audio frames in order.
pub trait FrameSource {
    /// Samples per frame returned by [`read_frame`](Self::read_frame)
    fn frame_len(&self) -> usize;

    /// Block until the next frame is available
    ///
    /// Replay sources return [`AudioError::SourceExhausted`] once drained.
    fn read_frame(&mut self) -> Result<AudioFrame, AudioError>;

    /// Start again from the first frame (no-op for live sources)
    fn rewind(&mut self) -> Result<(), AudioError>;

    /// Drop audio buffered while nobody was reading (no-op for replay sources)
    fn discard_pending(&mut self) {}
}

/// Pre-built frames, handed out in order.
#[derive(Debug, Clone)]
pub struct MemoryFrameSource {
    frames: Vec<AudioFrame>,
    position: usize,
    frame_len: usize,
}

impl MemoryFrameSource {
    pub fn new(frames: Vec<AudioFrame>) -> Self {
        let frame_len = frames.first().map(AudioFrame::len).unwrap_or(0);
        Self {
            frames,
            position: 0,
            frame_len,
        }
    }

    /// Split a continuous sample stream into frames, zero-padding the tail
    pub fn from_samples(samples: &[i16], frame_len: usize) -> Self {
        let frames = if frame_len == 0 {
            Vec::new()
        } else {
            samples
                .chunks(frame_len)
                .map(|chunk| {
                    let mut frame = chunk.to_vec();
                    frame.resize(frame_len, 0);
                    AudioFrame::new(frame)
                })
                .collect()
        };

        Self {
            frames,
            position: 0,
            frame_len,
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len() - self.position
    }
}

impl FrameSource for MemoryFrameSource {
    fn frame_len(&self) -> usize {
        self.frame_len
    }

    fn read_frame(&mut self) -> Result<AudioFrame, AudioError> {
        let frame = self
            .frames
            .get(self.position)
            .cloned()
            .ok_or(AudioError::SourceExhausted)?;
        self.position += 1;
        Ok(frame)
    }

    fn rewind(&mut self) -> Result<(), AudioError> {
        self.position = 0;
        Ok(())
    }
}

/// Mono WAV file replayed frame by frame.
pub struct WavFrameSource {
    sample_rate: u32,
    frames: MemoryFrameSource,
}

impl WavFrameSource {
    /// Load a mono WAV file and split it into `frame_len` frames
    ///
    /// Integer samples wider than 16 bits are shifted down, float samples
    /// are scaled from `[-1, 1]` to the i16 range.
    pub fn open<P: AsRef<Path>>(path: P, frame_len: usize) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let (samples, sample_rate) = read_wav_i16(path)?;

        tracing::info!(
            "[Replay] Loaded {} samples @ {} Hz from {}",
            samples.len(),
            sample_rate,
            path.display()
        );

        Ok(Self {
            sample_rate,
            frames: MemoryFrameSource::from_samples(&samples, frame_len),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn remaining(&self) -> usize {
        self.frames.remaining()
    }
}

impl FrameSource for WavFrameSource {
    fn frame_len(&self) -> usize {
        self.frames.frame_len()
    }

    fn read_frame(&mut self) -> Result<AudioFrame, AudioError> {
        self.frames.read_frame()
    }

    fn rewind(&mut self) -> Result<(), AudioError> {
        self.frames.rewind()
    }
}

fn read_wav_i16(path: &Path) -> Result<(Vec<i16>, u32), AudioError> {
    let mut reader = hound::WavReader::open(path).map_err(|err| AudioError::StreamOpenFailed {
        reason: format!("opening {}: {}", path.display(), err),
    })?;
    let spec = reader.spec();
    if spec.channels != 1 {
        return Err(AudioError::UnsupportedSampleFormat {
            format: format!(
                "{} must be mono (found {} channels)",
                path.display(),
                spec.channels
            ),
        });
    }

    let read_err = |err: hound::Error| AudioError::StreamFailure {
        reason: format!("reading {}: {}", path.display(), err),
    };

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|sample| sample.map_err(read_err))
            .collect::<Result<Vec<i16>, AudioError>>()?,
        (hound::SampleFormat::Int, bits @ (24 | 32)) => {
            let shift = bits - 16;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|v| (v >> shift) as i16).map_err(read_err))
                .collect::<Result<Vec<i16>, AudioError>>()?
        }
        (hound::SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|sample| sample.map(f32_to_i16).map_err(read_err))
            .collect::<Result<Vec<i16>, AudioError>>()?,
        (format, bits) => {
            return Err(AudioError::UnsupportedSampleFormat {
                format: format!("{:?} {}-bit in {}", format, bits, path.display()),
            })
        }
    };

    Ok((samples, spec.sample_rate))
}

/// Scale a `[-1, 1]` float sample to i16, saturating outside that range
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample * i16::MAX as f32).clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_in_order_then_exhausted() {
        let mut source = MemoryFrameSource::new(vec![
            AudioFrame::new(vec![1, 2]),
            AudioFrame::new(vec![3, 4]),
        ]);
        assert_eq!(source.frame_len(), 2);
        assert_eq!(source.read_frame().unwrap().samples(), &[1, 2]);
        assert_eq!(source.read_frame().unwrap().samples(), &[3, 4]);
        assert_eq!(source.read_frame(), Err(AudioError::SourceExhausted));

        source.rewind().unwrap();
        assert_eq!(source.read_frame().unwrap().samples(), &[1, 2]);
    }

    #[test]
    fn test_from_samples_pads_last_frame() {
        let mut source = MemoryFrameSource::from_samples(&[1, 2, 3, 4, 5], 2);
        assert_eq!(source.remaining(), 3);
        source.read_frame().unwrap();
        source.read_frame().unwrap();
        assert_eq!(source.read_frame().unwrap().samples(), &[5, 0]);
    }

    #[test]
    fn test_f32_to_i16_saturates() {
        assert_eq!(f32_to_i16(0.0), 0);
        assert_eq!(f32_to_i16(1.0), i16::MAX);
        assert_eq!(f32_to_i16(2.0), i16::MAX);
        assert_eq!(f32_to_i16(-2.0), i16::MIN);
    }

    #[test]
    fn test_wav_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!(
            "whistle_source_test_{}.wav",
            std::process::id()
        ));
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for v in 0..10i16 {
            writer.write_sample(v * 100).unwrap();
        }
        writer.finalize().unwrap();

        let mut source = WavFrameSource::open(&path, 4).unwrap();
        assert_eq!(source.sample_rate(), 44_100);
        assert_eq!(source.remaining(), 3);
        assert_eq!(source.read_frame().unwrap().samples(), &[0, 100, 200, 300]);
        source.read_frame().unwrap();
        assert_eq!(source.read_frame().unwrap().samples(), &[800, 900, 0, 0]);
        assert_eq!(source.read_frame(), Err(AudioError::SourceExhausted));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_wav_is_open_failure() {
        let err = WavFrameSource::open("no/such/file.wav", 1024).err().unwrap();
        assert!(matches!(err, AudioError::StreamOpenFailed { .. }));
    }
}
