//! Deterministic signal generators for tests and replay fixtures.
//!
//! Tones are generated at exact FFT bin frequencies (`bin * rate / len`), so
//! the frequency estimator returns `bin` for them without leakage.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::PI;

use crate::analysis::FrequencyProxy;
use crate::audio::AudioFrame;

/// Sine frame of `len` samples whose energy sits exactly on `bin`
pub fn tone_frame(bin: FrequencyProxy, len: usize, amplitude: f64) -> Vec<i16> {
    (0..len)
        .map(|i| {
            let phase = 2.0 * PI * bin as f64 * i as f64 / len as f64;
            (phase.sin() * amplitude).round() as i16
        })
        .collect()
}

/// One tone frame per bin, in order
pub fn chirp_frames(bins: &[FrequencyProxy], len: usize, amplitude: f64) -> Vec<AudioFrame> {
    bins.iter()
        .map(|&bin| AudioFrame::new(tone_frame(bin, len, amplitude)))
        .collect()
}

/// Uniform white noise in `[-amplitude, amplitude)`, reproducible per seed
pub fn noise_frame(len: usize, amplitude: f64, seed: u64) -> Vec<i16> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| rng.gen_range(-amplitude..amplitude).round() as i16)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_frame_shape() {
        let frame = tone_frame(4, 16, 1000.0);
        assert_eq!(frame.len(), 16);
        assert_eq!(frame[0], 0);
        // Quarter period of bin 4 in 16 samples is sample 1
        assert_eq!(frame[1], 1000);
    }

    #[test]
    fn test_noise_is_reproducible() {
        assert_eq!(noise_frame(64, 100.0, 7), noise_frame(64, 100.0, 7));
        assert_ne!(noise_frame(64, 100.0, 7), noise_frame(64, 100.0, 8));
        assert!(noise_frame(64, 100.0, 7).iter().all(|s| s.abs() <= 100));
    }

    #[test]
    fn test_chirp_frames_follow_bins() {
        let frames = chirp_frames(&[10, 20, 30], 256, 500.0);
        assert_eq!(frames.len(), 3);
        assert!(frames.iter().all(|f| f.len() == 256));
    }
}
