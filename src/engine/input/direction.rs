// Facing directions and per-direction lookup tables

use glam::Vec2;
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the four directions a character can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Facing the camera (down the screen)
    Front,
    /// Facing away from the camera (up the screen)
    Back,
    Left,
    Right,
}

impl Direction {
    /// All directions, in table order
    pub const ALL: [Direction; 4] = [
        Direction::Front,
        Direction::Back,
        Direction::Left,
        Direction::Right,
    ];

    /// Position of this direction in per-direction tables
    pub fn index(self) -> usize {
        match self {
            Self::Front => 0,
            Self::Back => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }

    /// Unit movement vector in screen space (y grows downward)
    pub fn vector(self) -> Vec2 {
        match self {
            Self::Front => Vec2::new(0.0, 1.0),
            Self::Back => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed table holding one value per direction
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionMap<T>([T; 4]);

impl<T> DirectionMap<T> {
    /// Build a table from explicit values, in `Direction::ALL` order
    pub fn new(front: T, back: T, left: T, right: T) -> Self {
        Self([front, back, left, right])
    }

    /// Build a table by calling `f` once per direction
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        Self(Direction::ALL.map(&mut f))
    }

    /// Build a new table by transforming every entry
    pub fn map<U>(&self, mut f: impl FnMut(Direction, &T) -> U) -> DirectionMap<U> {
        DirectionMap::from_fn(|direction| f(direction, &self[direction]))
    }

    /// Iterate over (direction, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().zip(self.0.iter())
    }

    /// Iterate mutably over all values
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut()
    }
}

impl<T: Clone> DirectionMap<T> {
    /// Use the same value for every direction
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T> Index<Direction> for DirectionMap<T> {
    type Output = T;

    fn index(&self, direction: Direction) -> &T {
        &self.0[direction.index()]
    }
}

impl<T> IndexMut<Direction> for DirectionMap<T> {
    fn index_mut(&mut self, direction: Direction) -> &mut T {
        &mut self.0[direction.index()]
    }
}
