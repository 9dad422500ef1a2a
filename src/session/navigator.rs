// NavigatorSession - chirp detection feeding the list navigator
//
// Per frame: estimate the proxy, push it into the history, classify the
// history, apply the signal to the selection and emit the matching key.

use serde::Serialize;

use crate::analysis::{FrequencyEstimator, FrequencyProxy, NavSignal, PitchHistory, TrendClassifier};
use crate::audio::AudioFrame;
use crate::config::AppConfig;
use crate::navigator::{KeyInjector, LogKeyInjector, NavKey, Navigator};
use crate::session::Session;

/// Snapshot of one processed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigatorFrame {
    pub proxy: FrequencyProxy,
    pub signal: NavSignal,
    pub selected: usize,
    /// Key emitted this frame, if the selection moved
    pub key: Option<NavKey>,
}

pub struct NavigatorSession<K: KeyInjector = LogKeyInjector> {
    estimator: FrequencyEstimator,
    history: PitchHistory,
    classifier: TrendClassifier,
    navigator: Navigator,
    keys: K,
    frame_len: usize,
}

impl<K: KeyInjector> NavigatorSession<K> {
    /// Session with the low-pass + Gaussian estimator from `config`
    pub fn new(config: &AppConfig, keys: K) -> Self {
        Self {
            estimator: FrequencyEstimator::for_navigator(&config.audio, &config.navigator),
            history: PitchHistory::new(),
            classifier: TrendClassifier::new(config.navigator.loudness_gate),
            navigator: Navigator::new(),
            keys,
            frame_len: config.navigator.chunk_size,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn history(&self) -> &PitchHistory {
        &self.history
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    pub fn into_keys(self) -> K {
        self.keys
    }
}

impl<K: KeyInjector> Session for NavigatorSession<K> {
    type Report = NavigatorFrame;

    fn frame_len(&self) -> usize {
        self.frame_len
    }

    fn step(&mut self, frame: &AudioFrame) -> NavigatorFrame {
        let proxy = self.estimator.estimate(frame.samples());
        self.history.append(proxy);
        let signal = self.classifier.classify(&mut self.history);
        let key = self.navigator.apply(signal, &mut self.keys);

        tracing::debug!(
            "[Navigator] proxy={} history={:?} signal={:?}",
            proxy,
            self.history.values(),
            signal
        );

        NavigatorFrame {
            proxy,
            signal,
            selected: self.navigator.selected(),
            key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::RecordingKeyInjector;
    use crate::testing::chirp_frames;

    fn session() -> NavigatorSession<RecordingKeyInjector> {
        NavigatorSession::new(&AppConfig::default(), RecordingKeyInjector::new())
    }

    #[test]
    fn test_rising_chirp_moves_up_on_tenth_frame() {
        let mut session = session();
        let bins: Vec<u32> = (0..10).map(|i| 15 + 2 * i).collect();

        let reports: Vec<NavigatorFrame> = chirp_frames(&bins, 1024, 10000.0)
            .iter()
            .map(|frame| session.step(frame))
            .collect();

        assert!(reports[..9].iter().all(|r| r.signal == NavSignal::None));
        assert_eq!(reports[9].signal, NavSignal::Up);
        assert_eq!(reports[9].selected, 2);
        assert_eq!(reports[9].key, Some(NavKey::Up));
        assert_eq!(session.keys().events(), &[NavKey::Up]);
        // History is cleared after a classification
        assert_eq!(session.history().count_above(0), 0);
    }

    #[test]
    fn test_falling_chirp_moves_down() {
        let mut session = session();
        let bins: Vec<u32> = (0..10).map(|i| 33 - 2 * i).collect();

        let last = chirp_frames(&bins, 1024, 10000.0)
            .iter()
            .map(|frame| session.step(frame))
            .last()
            .unwrap();

        assert_eq!(last.signal, NavSignal::Down);
        assert_eq!(last.selected, 1);
    }

    #[test]
    fn test_silence_never_moves() {
        let mut session = session();
        let silent = AudioFrame::silent(1024);
        for _ in 0..30 {
            let report = session.step(&silent);
            assert_eq!(report.signal, NavSignal::None);
            assert_eq!(report.selected, 0);
        }
        assert!(session.into_keys().events().is_empty());
    }
}
