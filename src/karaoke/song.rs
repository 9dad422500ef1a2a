// Song - ordered timeline of notes scrolling right to left
//
// Insertion order is play order. Notes are spaced so that at most one of
// them spans the player's x position at any time.

use crate::analysis::PitchMapper;
use crate::config::KaraokeConfig;
use crate::karaoke::note::Note;

#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    notes: Vec<Note>,
    scroll_step: f32,
    mapper: PitchMapper,
}

impl Song {
    pub fn new(notes: Vec<Note>, scroll_step: f32, mapper: PitchMapper) -> Self {
        Self {
            notes,
            scroll_step,
            mapper,
        }
    }

    /// Build the configured song, notes starting at the right window edge
    pub fn from_config(config: &KaraokeConfig) -> Self {
        let mapper = mapper_for(config);
        let notes = config
            .notes
            .iter()
            .map(|spec| {
                Note::new(
                    spec.target_proxy,
                    config.window_width + spec.offset_x,
                    config.note_width,
                    config.note_height,
                    &mapper,
                )
            })
            .collect();

        Self::new(notes, config.scroll_step, mapper)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn mapper(&self) -> &PitchMapper {
        &self.mapper
    }

    /// Move every note one step to the left
    pub fn advance(&mut self) {
        for note in self.notes.iter_mut() {
            note.x -= self.scroll_step;
        }
    }

    /// First note whose horizontal span contains `player_x`
    pub fn active_note(&self, player_x: f32) -> Option<(usize, &Note)> {
        self.notes
            .iter()
            .enumerate()
            .find(|(_, note)| note.spans_x(player_x))
    }

    /// True once the last note has fully left the screen (or there is none)
    pub fn is_over(&self) -> bool {
        self.notes.last().map_or(true, Note::has_exited)
    }
}

/// Mapper for the game area described by `config`
pub fn mapper_for(config: &KaraokeConfig) -> PitchMapper {
    PitchMapper::new(
        config.game_area_lower_y,
        config.game_area_upper_y,
        config.max_freq,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_song_layout() {
        let song = Song::from_config(&KaraokeConfig::default());
        let xs: Vec<f32> = song.notes().iter().map(|n| n.x).collect();
        assert_eq!(xs, vec![800.0, 1100.0, 1400.0]);
        let targets: Vec<u32> = song.notes().iter().map(|n| n.target_proxy).collect();
        assert_eq!(targets, vec![216, 242, 257]);
        // y values are rising with the target pitch
        assert!(song.notes()[0].y < song.notes()[1].y);
        assert!(song.notes()[1].y < song.notes()[2].y);
    }

    #[test]
    fn test_advance_moves_all_notes() {
        let mut song = Song::from_config(&KaraokeConfig::default());
        song.advance();
        let xs: Vec<f32> = song.notes().iter().map(|n| n.x).collect();
        assert_eq!(xs, vec![790.0, 1090.0, 1390.0]);
    }

    #[test]
    fn test_active_note_lookup() {
        let mut song = Song::from_config(&KaraokeConfig::default());
        assert!(song.active_note(400.0).is_none());

        // First note reaches x = 400 after 40 steps
        for _ in 0..40 {
            song.advance();
        }
        let (index, note) = song.active_note(400.0).unwrap();
        assert_eq!(index, 0);
        assert_eq!(note.target_proxy, 216);

        // Spacing leaves a gap between notes
        for _ in 0..21 {
            song.advance();
        }
        assert!(song.active_note(400.0).is_none());
    }

    #[test]
    fn test_at_most_one_active_note() {
        let mut song = Song::from_config(&KaraokeConfig::default());
        for _ in 0..200 {
            song.advance();
            let spanning = song.notes().iter().filter(|n| n.spans_x(400.0)).count();
            assert!(spanning <= 1);
        }
    }

    #[test]
    fn test_song_over_when_last_note_exits() {
        let mut song = Song::from_config(&KaraokeConfig::default());
        for _ in 0..159 {
            song.advance();
        }
        assert!(!song.is_over());
        song.advance();
        assert!(song.is_over());
    }

    #[test]
    fn test_empty_song_is_over() {
        let song = Song::new(Vec::new(), 10.0, PitchMapper::new(100.0, 500.0, 500));
        assert!(song.is_over());
    }
}
