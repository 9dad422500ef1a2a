// Karaoke module - scrolling note timeline and pitch-tracking score
//
// The player whistles to move a marker vertically; notes scroll in from the
// right and score while the marker overlaps the note under the player.

pub mod engine;
pub mod note;
pub mod song;

pub use engine::{GameState, KaraokeFrame, RhythmEngine};
pub use note::{Note, PlayerMarker};
pub use song::{mapper_for, Song};
