// Player tunables - one hero, one set of numbers
// Appearance comes from EQUIPMENT, not from base stats

use crate::core::Rect;
use crate::engine::input::Direction;

/// Fixed player properties
#[derive(Debug, Clone)]
pub struct PlayerStats {
    // Layout
    /// Size of one composited sprite cell in pixels
    pub cell_size: (u32, u32),
    /// Solid interior of the cell used for hit tests
    pub mask_rect: Rect,
    /// Footprint of the drop shadow
    pub shadow_size: (u32, u32),

    // Movement
    /// Walking speed in pixels per second
    pub speed: f32,
    /// Facing direction before any key is pressed
    pub initial_direction: Direction,

    // Combat
    /// Starting health points
    pub max_health: i32,
}

/// The hero's stats
pub const BASE_STATS: PlayerStats = PlayerStats {
    cell_size: (50, 50),
    mask_rect: Rect::new(10, 20, 30, 30),
    shadow_size: (40, 20),

    speed: 190.0,
    initial_direction: Direction::Back,

    max_health: 28,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

/// Playback settings for composited animations
#[derive(Debug, Clone)]
pub struct AnimationSettings {
    /// Walk cycle rate in frames per second
    pub standard_fps: f32,
    /// Hit-flash strobe rate in frames per second
    pub hit_fps: f32,
    /// How many times the hit-flash cycle plays before it ends
    pub hit_loops: u32,
}

pub const ANIMATION_SETTINGS: AnimationSettings = AnimationSettings {
    standard_fps: 7.0,
    hit_fps: 20.0,
    hit_loops: 10,
};

impl Default for AnimationSettings {
    fn default() -> Self {
        ANIMATION_SETTINGS
    }
}

impl AnimationSettings {
    /// How long one hit-flash lasts for a clip with `frame_count` frames
    pub fn hit_duration(&self, frame_count: usize) -> f32 {
        frame_count as f32 * self.hit_loops as f32 / self.hit_fps
    }
}
