// Mapper module - frequency proxy to vertical screen coordinate

use crate::analysis::estimator::FrequencyProxy;

/// Linear map of `proxy` onto `[y_lower, y_upper]`
///
/// The proxy is clamped to `[0, max_freq]` first, so anything above
/// `max_freq` lands on `y_upper`. A `max_freq` of 0 maps everything to
/// `y_lower`.
pub fn pitch_to_position(
    proxy: FrequencyProxy,
    y_lower: f32,
    y_upper: f32,
    max_freq: FrequencyProxy,
) -> f32 {
    if max_freq == 0 {
        return y_lower;
    }

    let clamped = proxy.min(max_freq);
    y_lower + (y_upper - y_lower) * (clamped as f32 / max_freq as f32)
}

/// Bounds shared by the player marker and the song's notes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchMapper {
    pub y_lower: f32,
    pub y_upper: f32,
    pub max_freq: FrequencyProxy,
}

impl PitchMapper {
    pub fn new(y_lower: f32, y_upper: f32, max_freq: FrequencyProxy) -> Self {
        Self {
            y_lower,
            y_upper,
            max_freq,
        }
    }

    pub fn map(&self, proxy: FrequencyProxy) -> f32 {
        pitch_to_position(proxy, self.y_lower, self.y_upper, self.max_freq)
    }

    /// Like [`map`](Self::map), but proxies at or below `silence_floor`
    /// snap to `y_lower` so noise-floor peaks do not make the marker jitter.
    pub fn map_with_floor(&self, proxy: FrequencyProxy, silence_floor: FrequencyProxy) -> f32 {
        if proxy <= silence_floor {
            self.y_lower
        } else {
            self.map(proxy)
        }
    }
}
