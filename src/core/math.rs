// Math utilities and helper functions

use glam::Vec2;

/// Integer screen-space rectangle
///
/// Characters keep their sub-pixel position in a `Vec2` and commit it here
/// once per tick for drawing and collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner as a float vector
    pub fn topleft(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// Move the rectangle so its top-left corner sits at `position`
    /// Fractional coordinates are truncated toward zero
    pub fn set_topleft(&mut self, position: Vec2) {
        self.x = position.x as i32;
        self.y = position.y as i32;
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn center_x(&self) -> i32 {
        self.x + (self.width / 2) as i32
    }

    /// Midpoint of the bottom edge
    pub fn midbottom(&self) -> (i32, i32) {
        (self.center_x(), self.bottom())
    }

    /// Check whether two rectangles share any area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Add `amount` to an 8-bit channel, saturating at `ceiling`
pub fn add_clamped(value: u8, amount: u8, ceiling: u8) -> u8 {
    (u16::from(value) + u16::from(amount)).min(u16::from(ceiling)) as u8
}
