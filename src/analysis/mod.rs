// Analysis module - pitch estimation and pitch-driven signals
//
// Pipeline per frame:
// - FrequencyEstimator: PCM frame -> frequency proxy (dominant bin index)
// - PitchMapper: proxy -> vertical coordinate (karaoke)
// - PitchHistory + TrendClassifier: proxy stream -> Up/Down/None (navigator)

pub mod estimator;
pub mod filter;
pub mod history;
pub mod mapper;
pub mod smoothing;
pub mod spectrum;
pub mod trend;

pub use estimator::{FrequencyEstimator, FrequencyProxy};
pub use history::{PitchHistory, HISTORY_LEN};
pub use mapper::{pitch_to_position, PitchMapper};
pub use trend::{regression_slope, NavSignal, TrendClassifier};
