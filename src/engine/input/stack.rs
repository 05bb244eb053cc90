// Held direction keys, most recent last

use super::direction::Direction;

/// Directions whose keys are currently held, in the order they were pressed
///
/// Pressing a direction that is already held moves it to the top instead of
/// duplicating it, so releasing the newest key falls back to the previous
/// still-held one (key rollover).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionStack {
    held: Vec<Direction>,
}

impl DirectionStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self {
            held: Vec::with_capacity(Direction::ALL.len()),
        }
    }

    /// Register a pressed direction, moving it to the top if already held
    pub fn push(&mut self, direction: Direction) {
        self.held.retain(|held| *held != direction);
        self.held.push(direction);
    }

    /// Register a released direction
    /// Returns true if the direction was held
    pub fn remove(&mut self, direction: Direction) -> bool {
        if let Some(pos) = self.held.iter().position(|held| *held == direction) {
            self.held.remove(pos);
            true
        } else {
            false
        }
    }

    /// The most recently pressed direction that is still held
    pub fn top(&self) -> Option<Direction> {
        self.held.last().copied()
    }

    /// Check if a direction is held
    pub fn contains(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    /// Release everything
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Held directions, oldest first
    pub fn as_slice(&self) -> &[Direction] {
        &self.held
    }
}
