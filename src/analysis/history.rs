// History module - fixed window of recent frequency proxies
//
// Holds exactly HISTORY_LEN values in arrival order: index 0 is the oldest,
// the last index the newest. Appending discards the oldest value; the window
// never grows.

use crate::analysis::estimator::FrequencyProxy;

/// Number of proxies the trend classifier looks at
pub const HISTORY_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PitchHistory {
    values: [FrequencyProxy; HISTORY_LEN],
}

impl PitchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the newest proxy, dropping the oldest one
    pub fn append(&mut self, proxy: FrequencyProxy) {
        self.values.rotate_left(1);
        self.values[HISTORY_LEN - 1] = proxy;
    }

    /// Current window, oldest first
    pub fn values(&self) -> &[FrequencyProxy; HISTORY_LEN] {
        &self.values
    }

    /// Number of entries strictly above `threshold`
    pub fn count_above(&self, threshold: FrequencyProxy) -> usize {
        self.values.iter().filter(|&&v| v > threshold).count()
    }

    pub fn reset(&mut self) {
        self.values = [0; HISTORY_LEN];
    }
}
