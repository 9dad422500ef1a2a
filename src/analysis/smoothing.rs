// Smoothing module - Gaussian noise suppression
//
// Convolves the filtered frame with a short normalised Gaussian kernel and
// keeps the centred part of the full convolution, so the output has the
// same length as the input.

/// Normalised, symmetric Gaussian kernel
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    taps: Vec<f64>,
}

impl GaussianKernel {
    /// Build a kernel of `size` taps with standard deviation `sigma`
    ///
    /// Tap `i` is `exp(-n^2 / (2 sigma^2))` with `n = i - (size - 1) / 2`,
    /// then all taps are divided by their sum.
    pub fn new(size: usize, sigma: f64) -> Self {
        let centre = (size as f64 - 1.0) / 2.0;
        let mut taps: Vec<f64> = (0..size)
            .map(|i| {
                let n = i as f64 - centre;
                (-(n * n) / (2.0 * sigma * sigma)).exp()
            })
            .collect();

        let sum: f64 = taps.iter().sum();
        if sum > 0.0 {
            for tap in taps.iter_mut() {
                *tap /= sum;
            }
        }

        Self { taps }
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    /// Convolve and keep the centred window of length `max(len, taps)`
    pub fn convolve_same(&self, signal: &[f64]) -> Vec<f64> {
        convolve_same(signal, &self.taps)
    }
}

/// Linear convolution trimmed to the centred `max(a.len(), v.len())` samples
pub fn convolve_same(a: &[f64], v: &[f64]) -> Vec<f64> {
    if a.is_empty() || v.is_empty() {
        return Vec::new();
    }

    let out_len = a.len().max(v.len());
    let start = (a.len().min(v.len()) - 1) / 2;

    (start..start + out_len)
        .map(|k| {
            // full[k] = sum_j a[k - j] * v[j]
            let j_min = k.saturating_sub(a.len() - 1);
            let j_max = k.min(v.len() - 1);
            (j_min..=j_max).map(|j| a[k - j] * v[j]).sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_is_normalised_and_symmetric() {
        let kernel = GaussianKernel::new(5, 3.0);
        let taps = kernel.taps();
        assert_eq!(taps.len(), 5);
        let sum: f64 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((taps[0] - taps[4]).abs() < 1e-15);
        assert!((taps[1] - taps[3]).abs() < 1e-15);
        assert!(taps[2] > taps[1] && taps[1] > taps[0]);
    }

    #[test]
    fn test_convolve_same_keeps_length_and_centre() {
        let out = convolve_same(&[1.0, 2.0, 3.0], &[0.0, 1.0, 0.5]);
        assert_eq!(out, vec![1.0, 2.5, 4.0]);
    }

    #[test]
    fn test_constant_signal_interior_unchanged() {
        let kernel = GaussianKernel::new(5, 3.0);
        let out = kernel.convolve_same(&vec![2.0; 32]);
        assert_eq!(out.len(), 32);
        for value in &out[2..30] {
            assert!((value - 2.0).abs() < 1e-12);
        }
        // Edges only see part of the kernel
        assert!(out[0] < 2.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(convolve_same(&[], &[1.0]).is_empty());
    }
}
