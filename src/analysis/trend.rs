// Trend module - rising/falling chirp classification
//
// Fits an ordinary least-squares line through the pitch history (x = 0..9)
// and maps the slope sign to a navigation signal. Classification only runs
// when every history entry is above the loudness gate; the gate compares the
// raw proxy value, not an amplitude.

use serde::{Deserialize, Serialize};

use crate::analysis::estimator::FrequencyProxy;
use crate::analysis::history::{PitchHistory, HISTORY_LEN};

/// Navigation signal produced once per classification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavSignal {
    /// Rising chirp
    Up,
    /// Falling (or flat) chirp
    Down,
    /// Gate not passed
    None,
}

/// Classifies the pitch history into a navigation signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendClassifier {
    loudness_gate: FrequencyProxy,
}

impl TrendClassifier {
    pub fn new(loudness_gate: FrequencyProxy) -> Self {
        Self { loudness_gate }
    }

    /// Classify the current history window
    ///
    /// Requires all HISTORY_LEN entries to exceed the gate. On success the
    /// history is zeroed whatever the slope; on failure it is left untouched
    /// and `NavSignal::None` is returned.
    pub fn classify(&self, history: &mut PitchHistory) -> NavSignal {
        if history.count_above(self.loudness_gate) < HISTORY_LEN {
            return NavSignal::None;
        }

        let values: Vec<f64> = history.values().iter().map(|&v| v as f64).collect();
        let slope = regression_slope(&values);
        history.reset();

        let signal = if slope > 0.0 {
            NavSignal::Up
        } else {
            NavSignal::Down
        };
        tracing::debug!("[Trend] slope={:.3} -> {:?}", slope, signal);
        signal
    }
}

/// Least-squares slope of `values` against x = 0, 1, ..., n-1
///
/// Returns 0 for fewer than two points.
pub fn regression_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let mean_x = (n as f64 - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n as f64;

    let (covariance, variance) = values.iter().enumerate().fold(
        (0.0, 0.0),
        |(cov, var), (i, &y)| {
            let dx = i as f64 - mean_x;
            (cov + dx * (y - mean_y), var + dx * dx)
        },
    );

    covariance / variance
}
