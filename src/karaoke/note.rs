// Note and PlayerMarker - the two shapes whose overlap scores points

use crate::analysis::{FrequencyProxy, PitchMapper};

/// Target note scrolling across the screen
///
/// `y` is fixed at construction from `target_proxy`; only `x` changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub target_proxy: FrequencyProxy,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Note {
    pub fn new(
        target_proxy: FrequencyProxy,
        x: f32,
        width: f32,
        height: f32,
        mapper: &PitchMapper,
    ) -> Self {
        Self {
            target_proxy,
            x,
            y: mapper.map(target_proxy),
            width,
            height,
        }
    }

    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Whether the horizontal span contains `x` (edges inclusive)
    pub fn spans_x(&self, x: f32) -> bool {
        self.x <= x && self.right_edge() >= x
    }

    /// Strict interval intersection of `[lower, upper]` with `[y, y + height]`
    pub fn overlaps_vertically(&self, lower: f32, upper: f32) -> bool {
        upper > self.y && lower < self.y + self.height
    }

    /// Fully past the left boundary
    pub fn has_exited(&self) -> bool {
        self.right_edge() <= 0.0
    }
}

/// The circle the player moves by whistling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerMarker {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    mapper: PitchMapper,
    silence_floor: FrequencyProxy,
}

impl PlayerMarker {
    /// Marker resting on the lower bound of the game area
    pub fn new(x: f32, radius: f32, mapper: PitchMapper, silence_floor: FrequencyProxy) -> Self {
        Self {
            x,
            y: mapper.y_lower,
            radius,
            mapper,
            silence_floor,
        }
    }

    /// Move to the position of `proxy`; near-silent input rests on the floor
    pub fn update(&mut self, proxy: FrequencyProxy) -> f32 {
        self.y = self.mapper.map_with_floor(proxy, self.silence_floor);
        self.y
    }

    pub fn lower(&self) -> f32 {
        self.y - self.radius
    }

    pub fn upper(&self) -> f32 {
        self.y + self.radius
    }

    pub fn touches(&self, note: &Note) -> bool {
        note.overlaps_vertically(self.lower(), self.upper())
    }
}
