// KaraokeSession - estimator plus rhythm engine for the karaoke game

use crate::analysis::FrequencyEstimator;
use crate::audio::AudioFrame;
use crate::config::AppConfig;
use crate::karaoke::{KaraokeFrame, RhythmEngine};
use crate::session::Session;

pub struct KaraokeSession {
    estimator: FrequencyEstimator,
    engine: RhythmEngine,
    frame_len: usize,
}

impl KaraokeSession {
    /// Session for the configured song, raw (unfiltered) estimator
    pub fn new(config: &AppConfig) -> Self {
        Self::with_engine(
            FrequencyEstimator::for_karaoke(&config.audio),
            RhythmEngine::new(&config.karaoke),
            config.karaoke.chunk_size,
        )
    }

    pub fn with_engine(estimator: FrequencyEstimator, engine: RhythmEngine, frame_len: usize) -> Self {
        Self {
            estimator,
            engine,
            frame_len,
        }
    }

    pub fn engine(&self) -> &RhythmEngine {
        &self.engine
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    /// Fresh song, score 0, back to playing
    pub fn restart(&mut self) {
        self.engine.restart();
    }
}

impl Session for KaraokeSession {
    type Report = KaraokeFrame;

    fn frame_len(&self) -> usize {
        self.frame_len
    }

    fn step(&mut self, frame: &AudioFrame) -> KaraokeFrame {
        let proxy = self.estimator.estimate(frame.samples());
        self.engine.update(proxy)
    }

    fn is_finished(&self) -> bool {
        self.engine.is_over()
    }
}
