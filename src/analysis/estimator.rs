// Estimator module - frame to frequency proxy
//
// Pipeline:
// 1. optional first-order Butterworth low-pass
// 2. optional Gaussian smoothing
// 3. magnitude spectrum
// 4. mask to non-negative frequency bins
// 5. argmax of the masked spectrum
//
// The returned value is the bin index itself, never converted to Hz
// (`index * rate / len`). Thresholds and note targets are tuned against the
// raw index.

use crate::analysis::filter::SosFilter;
use crate::analysis::smoothing::GaussianKernel;
use crate::analysis::spectrum::{argmax, FftProcessor};
use crate::config::{AudioConfig, NavigatorConfig};

/// Index of the dominant non-negative FFT bin of a frame
pub type FrequencyProxy = u32;

/// Converts raw PCM frames into a single frequency proxy per frame
pub struct FrequencyEstimator {
    sample_rate: u32,
    lowpass: Option<SosFilter>,
    smoothing: Option<GaussianKernel>,
    fft: Option<FftProcessor>,
}

impl FrequencyEstimator {
    /// Estimator without any pre-processing (karaoke)
    pub fn raw(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            lowpass: None,
            smoothing: None,
            fft: None,
        }
    }

    /// Estimator with low-pass and Gaussian pre-processing (navigator)
    pub fn filtered(sample_rate: u32, cutoff_hz: f64, kernel_size: usize, kernel_sigma: f64) -> Self {
        Self {
            sample_rate,
            lowpass: Some(SosFilter::butterworth_lowpass_first_order(
                cutoff_hz,
                sample_rate,
            )),
            smoothing: Some(GaussianKernel::new(kernel_size, kernel_sigma)),
            fft: None,
        }
    }

    pub fn for_karaoke(audio: &AudioConfig) -> Self {
        Self::raw(audio.sample_rate)
    }

    pub fn for_navigator(audio: &AudioConfig, navigator: &NavigatorConfig) -> Self {
        Self::filtered(
            audio.sample_rate,
            navigator.cutoff_hz,
            navigator.kernel_size,
            navigator.kernel_sigma,
        )
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Estimate the frequency proxy of one frame
    ///
    /// Result is in `[0, len/2)` for even lengths and deterministic for a
    /// given input. An empty frame yields 0.
    pub fn estimate(&mut self, samples: &[i16]) -> FrequencyProxy {
        if samples.is_empty() {
            return 0;
        }

        let mut signal: Vec<f64> = samples.iter().map(|&s| s as f64).collect();

        if let Some(lowpass) = &self.lowpass {
            signal = lowpass.apply(&signal);
        }
        if let Some(kernel) = &self.smoothing {
            signal = kernel.convolve_same(&signal);
        }

        let sample_rate = self.sample_rate;
        let fft = self.processor_for(signal.len());
        let spectrum = fft.non_negative_spectrum(&signal, sample_rate);

        argmax(&spectrum) as FrequencyProxy
    }

    // Re-plan only when the frame length changes
    fn processor_for(&mut self, len: usize) -> &mut FftProcessor {
        if self.fft.as_ref().map_or(true, |fft| fft.fft_size() != len) {
            tracing::debug!("[Estimator] Planning FFT for frame length {}", len);
            self.fft = Some(FftProcessor::new(len));
        }
        self.fft.get_or_insert_with(|| FftProcessor::new(len))
    }
}
