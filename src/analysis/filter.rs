// Filter module - second-order-section IIR filtering
//
// The navigator removes content above the whistle band before looking for
// the dominant bin. The filter is a first-order Butterworth low-pass built
// with the bilinear transform (frequency pre-warped) and run as a cascade
// of second-order sections in transposed direct form II, starting from a
// zero state on every frame.

use std::f64::consts::PI;

/// One second-order section with a0 normalised to 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

/// Cascade of second-order sections
#[derive(Debug, Clone, PartialEq)]
pub struct SosFilter {
    sections: Vec<Biquad>,
}

impl SosFilter {
    pub fn new(sections: Vec<Biquad>) -> Self {
        Self { sections }
    }

    /// First-order Butterworth low-pass
    ///
    /// With `k = tan(pi * cutoff / fs)` the digital filter is
    /// `H(z) = k/(1+k) * (1 + z^-1) / (1 + (k-1)/(k+1) * z^-1)`,
    /// stored as a single section with zero second-order terms.
    pub fn butterworth_lowpass_first_order(cutoff_hz: f64, sample_rate: u32) -> Self {
        let k = (PI * cutoff_hz / sample_rate as f64).tan();
        let gain = k / (1.0 + k);

        Self::new(vec![Biquad {
            b0: gain,
            b1: gain,
            b2: 0.0,
            a1: (k - 1.0) / (k + 1.0),
            a2: 0.0,
        }])
    }

    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Filter a whole frame, each section starting from rest
    pub fn apply(&self, signal: &[f64]) -> Vec<f64> {
        let mut output = signal.to_vec();

        for section in &self.sections {
            let mut z1 = 0.0;
            let mut z2 = 0.0;

            for sample in output.iter_mut() {
                let x = *sample;
                let y = section.b0 * x + z1;
                z1 = section.b1 * x - section.a1 * y + z2;
                z2 = section.b2 * x - section.a2 * y;
                *sample = y;
            }
        }

        output
    }
}
