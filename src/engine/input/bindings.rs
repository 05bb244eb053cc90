// Keyboard to direction bindings

use super::direction::Direction;
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Default arrow-key layout
pub fn default_bindings() -> Vec<(KeyCode, Direction)> {
    vec![
        (KeyCode::ArrowDown, Direction::Front),
        (KeyCode::ArrowUp, Direction::Back),
        (KeyCode::ArrowLeft, Direction::Left),
        (KeyCode::ArrowRight, Direction::Right),
    ]
}

/// Maps physical keys to movement directions
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Direction>,
}

impl KeyBindings {
    /// Create an empty binding set
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create bindings from a list of (key, direction) pairs
    pub fn from_bindings(bindings: Vec<(KeyCode, Direction)>) -> Self {
        let mut config = Self::new();
        for (key, direction) in bindings {
            config.bind(key, direction);
        }
        config
    }

    /// Bind a key to a direction, replacing any previous binding of that key
    pub fn bind(&mut self, key: KeyCode, direction: Direction) {
        self.bindings.insert(key, direction);
    }

    /// Remove a key binding
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    /// Get the direction bound to a key
    pub fn direction_for(&self, key: KeyCode) -> Option<Direction> {
        self.bindings.get(&key).copied()
    }

    /// Get all keys bound to a direction
    pub fn keys_for(&self, direction: Direction) -> Vec<KeyCode> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == direction)
            .map(|(key, _)| *key)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}
