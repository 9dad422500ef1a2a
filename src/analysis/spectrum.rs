// Spectrum module - Fast Fourier Transform computation
//
// Computes the magnitude spectrum of a processed frame and restricts it to
// the bins whose frequency-axis value is non-negative. No window is applied.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// FFT processor that computes magnitude spectra for one fixed frame length
pub struct FftProcessor {
    fft: Arc<dyn Fft<f64>>,
    fft_size: usize,
    buffer: Vec<Complex<f64>>,
}

impl FftProcessor {
    /// Create a new FFT processor
    ///
    /// # Arguments
    /// * `fft_size` - Frame length the forward transform is planned for
    pub fn new(fft_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        Self {
            fft,
            fft_size,
            buffer: Vec::with_capacity(fft_size),
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Compute magnitude spectrum using FFT
    ///
    /// Performs the forward transform and returns the magnitudes of every
    /// bin, in standard FFT order (length = fft_size). Shorter input is
    /// zero-padded, longer input truncated.
    pub fn compute_magnitude_spectrum(&mut self, signal: &[f64]) -> Vec<f64> {
        self.buffer.clear();
        self.buffer.extend(
            signal
                .iter()
                .take(self.fft_size)
                .map(|&sample| Complex::new(sample, 0.0)),
        );
        self.buffer.resize(self.fft_size, Complex::new(0.0, 0.0));

        self.fft.process(&mut self.buffer);

        self.buffer.iter().map(|c| c.norm()).collect()
    }

    /// Magnitudes of the bins whose frequency is non-negative
    ///
    /// The mask is derived from [`bin_frequencies`], so the result keeps the
    /// original bin order starting at DC.
    pub fn non_negative_spectrum(&mut self, signal: &[f64], sample_rate: u32) -> Vec<f64> {
        let spectrum = self.compute_magnitude_spectrum(signal);
        let frequencies = bin_frequencies(self.fft_size, sample_rate);

        spectrum
            .into_iter()
            .zip(frequencies)
            .filter(|(_, freq)| *freq >= 0.0)
            .map(|(magnitude, _)| magnitude)
            .collect()
    }
}

/// Frequency-axis value of every FFT bin for a transform of length `n`
///
/// Same layout as the conventional `fftfreq` helper: DC and positive
/// frequencies first, then the negative frequencies in increasing order.
pub fn bin_frequencies(n: usize, sample_rate: u32) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }

    let spacing = sample_rate as f64 / n as f64;
    let positive = (n - 1) / 2 + 1;

    (0..n)
        .map(|i| {
            if i < positive {
                i as f64 * spacing
            } else {
                (i as f64 - n as f64) * spacing
            }
        })
        .collect()
}

/// Index of the first maximum value, 0 for an empty slice
pub fn argmax(values: &[f64]) -> usize {
    let mut best_index = 0;
    let mut best_value = f64::NEG_INFINITY;

    for (i, &value) in values.iter().enumerate() {
        if value > best_value {
            best_value = value;
            best_index = i;
        }
    }

    best_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_bin_frequencies_even_length() {
        let freqs = bin_frequencies(8, 8);
        assert_eq!(freqs, vec![0.0, 1.0, 2.0, 3.0, -4.0, -3.0, -2.0, -1.0]);
    }

    #[test]
    fn test_bin_frequencies_odd_length() {
        let freqs = bin_frequencies(5, 5);
        assert_eq!(freqs, vec![0.0, 1.0, 2.0, -2.0, -1.0]);
    }

    #[test]
    fn test_non_negative_spectrum_length() {
        let mut fft = FftProcessor::new(1024);
        let spectrum = fft.non_negative_spectrum(&vec![0.0; 1024], 44_100);
        assert_eq!(spectrum.len(), 512);

        let mut fft = FftProcessor::new(9);
        let spectrum = fft.non_negative_spectrum(&vec![0.0; 9], 44_100);
        assert_eq!(spectrum.len(), 5);
    }

    #[test]
    fn test_sine_peaks_at_its_bin() {
        let n = 1024;
        let bin = 37;
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * bin as f64 * i as f64 / n as f64).sin())
            .collect();

        let mut fft = FftProcessor::new(n);
        let spectrum = fft.non_negative_spectrum(&signal, 44_100);
        assert_eq!(argmax(&spectrum), bin);
    }

    #[test]
    fn test_argmax_prefers_first_maximum() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(argmax(&[]), 0);
        assert_eq!(argmax(&[0.0, 0.0]), 0);
    }
}
