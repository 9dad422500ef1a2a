//! Configuration management for the karaoke game and the whistle navigator
//!
//! All thresholds here are calibrated against the frequency proxy (the index
//! of the dominant FFT bin), not against Hz. Defaults reproduce the tuned
//! values; a JSON file can override them for experimentation without
//! recompiling.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default location of the optional JSON config file
pub const DEFAULT_CONFIG_PATH: &str = "assets/whistle_config.json";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub karaoke: KaraokeConfig,
    #[serde(default)]
    pub navigator: NavigatorConfig,
}

/// Capture stream parameters shared by both applications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Sampling rate in Hz
    pub sample_rate: u32,
    /// Number of capture channels (mono)
    pub channels: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            channels: 1,
        }
    }
}

/// A note of the song, positioned relative to the right window edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteSpec {
    /// Frequency proxy the player has to whistle
    pub target_proxy: u32,
    /// Horizontal distance from the right window edge at song start
    pub offset_x: f32,
}

/// Karaoke game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KaraokeConfig {
    /// Samples per audio frame
    pub chunk_size: usize,
    pub window_width: f32,
    pub game_area_lower_y: f32,
    pub game_area_upper_y: f32,
    /// Proxy values above this are clamped before mapping
    pub max_freq: u32,
    /// Proxy values at or below this snap the marker to the floor
    pub silence_floor: u32,
    /// Horizontal distance every note moves per frame
    pub scroll_step: f32,
    /// Score awarded for every frame of overlap
    pub score_per_hit: u32,
    pub player_radius: f32,
    pub note_width: f32,
    pub note_height: f32,
    pub notes: Vec<NoteSpec>,
}

impl Default for KaraokeConfig {
    fn default() -> Self {
        Self {
            chunk_size: 8192,
            window_width: 800.0,
            game_area_lower_y: 100.0,
            game_area_upper_y: 500.0,
            max_freq: 500,
            silence_floor: 50,
            scroll_step: 10.0,
            score_per_hit: 10,
            player_radius: 10.0,
            note_width: 200.0,
            note_height: 20.0,
            notes: vec![
                NoteSpec {
                    target_proxy: 216,
                    offset_x: 0.0,
                },
                NoteSpec {
                    target_proxy: 242,
                    offset_x: 300.0,
                },
                NoteSpec {
                    target_proxy: 257,
                    offset_x: 600.0,
                },
            ],
        }
    }
}

impl KaraokeConfig {
    /// Fixed horizontal position of the player marker (screen centre)
    pub fn player_x(&self) -> f32 {
        self.window_width / 2.0
    }
}

/// Whistle navigator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Samples per audio frame
    pub chunk_size: usize,
    /// Gaussian smoothing kernel length
    pub kernel_size: usize,
    /// Gaussian smoothing kernel standard deviation
    pub kernel_sigma: f64,
    /// Low-pass cutoff in Hz
    pub cutoff_hz: f64,
    /// History values must exceed this for a trend to be classified
    pub loudness_gate: u32,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1024,
            kernel_size: 5,
            kernel_sigma: 3.0,
            cutoff_hz: 500.0,
            loudness_gate: 10,
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// Missing or malformed files fall back to the defaults with a warning,
    /// so a fresh checkout runs without any config present.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    tracing::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_PATH)
    }
}
