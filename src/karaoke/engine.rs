// RhythmEngine - per-frame scoring for the karaoke game
//
// Per frame, while the game is in `Start`:
// 1. every note moves one scroll step to the left
// 2. the player marker moves to the whistled pitch
// 3. the note spanning the player's x (if any) is the active note
// 4. overlap between marker and active note adds `score_per_hit`
// 5. once the last note has left the screen the game ends
//
// Points are awarded for every frame of overlap, not once per note. `End` is
// terminal: frames no longer move notes or change the score until
// `restart` rebuilds the whole session state.

use serde::{Deserialize, Serialize};

use crate::analysis::FrequencyProxy;
use crate::config::KaraokeConfig;
use crate::karaoke::note::PlayerMarker;
use crate::karaoke::song::Song;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Song is playing
    Start,
    /// Last note has scrolled off; waiting for a restart
    End,
}

/// Snapshot of one processed frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KaraokeFrame {
    pub proxy: FrequencyProxy,
    pub marker_y: f32,
    /// Index of the note spanning the player's x, if any
    pub active_note: Option<usize>,
    pub hit: bool,
    pub score: u32,
    pub state: GameState,
}

pub struct RhythmEngine {
    initial_song: Song,
    song: Song,
    marker: PlayerMarker,
    initial_marker: PlayerMarker,
    score_per_hit: u32,
    score: u32,
    state: GameState,
    frames_played: u64,
}

impl RhythmEngine {
    /// Engine playing the song described by `config`
    pub fn new(config: &KaraokeConfig) -> Self {
        Self::with_song(config, Song::from_config(config))
    }

    /// Engine playing a custom song with the marker settings of `config`
    pub fn with_song(config: &KaraokeConfig, song: Song) -> Self {
        let marker = PlayerMarker::new(
            config.player_x(),
            config.player_radius,
            *song.mapper(),
            config.silence_floor,
        );

        Self {
            initial_song: song.clone(),
            song,
            marker,
            initial_marker: marker,
            score_per_hit: config.score_per_hit,
            score: 0,
            state: GameState::Start,
            frames_played: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn marker(&self) -> &PlayerMarker {
        &self.marker
    }

    pub fn frames_played(&self) -> u64 {
        self.frames_played
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::End
    }

    /// Advance the game by one frame of whistled pitch
    pub fn update(&mut self, proxy: FrequencyProxy) -> KaraokeFrame {
        if self.state == GameState::End {
            return self.snapshot(proxy, None, false);
        }

        self.frames_played += 1;
        self.song.advance();
        let marker_y = self.marker.update(proxy);

        let active = self.song.active_note(self.marker.x);
        let active_note = active.map(|(index, _)| index);
        let hit = active.map_or(false, |(_, note)| self.marker.touches(note));
        if hit {
            self.score = self.score.saturating_add(self.score_per_hit);
        }

        tracing::debug!(
            "[Karaoke] proxy={} marker_y={:.1} active={:?} hit={} score={}",
            proxy,
            marker_y,
            active_note,
            hit,
            self.score
        );

        if self.song.is_over() {
            self.state = GameState::End;
            tracing::info!(
                "[Karaoke] Song over after {} frames, score {}",
                self.frames_played,
                self.score
            );
        }

        self.snapshot(proxy, active_note, hit)
    }

    /// Full reset: fresh song, score 0, back to `Start`
    pub fn restart(&mut self) {
        self.song = self.initial_song.clone();
        self.marker = self.initial_marker;
        self.score = 0;
        self.state = GameState::Start;
        self.frames_played = 0;
        tracing::info!("[Karaoke] Restarted");
    }

    fn snapshot(&self, proxy: FrequencyProxy, active_note: Option<usize>, hit: bool) -> KaraokeFrame {
        KaraokeFrame {
            proxy,
            marker_y: self.marker.y,
            active_note,
            hit,
            score: self.score,
            state: self.state,
        }
    }
}
