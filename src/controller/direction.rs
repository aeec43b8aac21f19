//! Direction types for analog sticks
//!
//! [`Direction`] is the closed set of eight targets a stick can drive.
//! [`StickDirection`] additionally carries the centered state and is what the
//! engine reports as the current stick position.

use crate::mapping::MappingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the eight directions a stick target can be bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    RightUp,
    Right,
    RightDown,
    Down,
    LeftDown,
    Left,
    LeftUp,
}

impl Direction {
    /// All directions, clockwise starting at Up
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::RightUp,
        Direction::Right,
        Direction::RightDown,
        Direction::Down,
        Direction::LeftDown,
        Direction::Left,
        Direction::LeftUp,
    ];

    /// The four cardinal directions
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn slot(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::RightUp => 1,
            Direction::Right => 2,
            Direction::RightDown => 3,
            Direction::Down => 4,
            Direction::LeftDown => 5,
            Direction::Left => 6,
            Direction::LeftUp => 7,
        }
    }

    /// Left and Right move along the horizontal axis
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Splits a diagonal into its (horizontal, vertical) cardinal components.
    ///
    /// Returns `None` for cardinal directions.
    pub fn components(self) -> Option<(Direction, Direction)> {
        match self {
            Direction::RightUp => Some((Direction::Right, Direction::Up)),
            Direction::RightDown => Some((Direction::Right, Direction::Down)),
            Direction::LeftDown => Some((Direction::Left, Direction::Down)),
            Direction::LeftUp => Some((Direction::Left, Direction::Up)),
            _ => None,
        }
    }

    /// Persisted direction code (clockwise, Up = 1)
    pub fn code(self) -> i32 {
        StickDirection::from(self).code()
    }

    pub fn from_code(code: i32) -> Result<Self, MappingError> {
        match StickDirection::from_code(code)? {
            StickDirection::Centered => Err(MappingError::UnknownDirection(code)),
            other => other.direction().ok_or(MappingError::UnknownDirection(code)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::RightUp => "Right Up",
            Direction::Right => "Right",
            Direction::RightDown => "Right Down",
            Direction::Down => "Down",
            Direction::LeftDown => "Left Down",
            Direction::Left => "Left",
            Direction::LeftUp => "Left Up",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Current stick position as reported by the engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StickDirection {
    #[default]
    Centered,
    Up,
    RightUp,
    Right,
    RightDown,
    Down,
    LeftDown,
    Left,
    LeftUp,
}

impl StickDirection {
    pub fn code(self) -> i32 {
        match self {
            StickDirection::Centered => 0,
            StickDirection::Up => 1,
            StickDirection::RightUp => 2,
            StickDirection::Right => 3,
            StickDirection::RightDown => 4,
            StickDirection::Down => 5,
            StickDirection::LeftDown => 6,
            StickDirection::Left => 7,
            StickDirection::LeftUp => 8,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, MappingError> {
        let direction = match code {
            0 => StickDirection::Centered,
            1 => StickDirection::Up,
            2 => StickDirection::RightUp,
            3 => StickDirection::Right,
            4 => StickDirection::RightDown,
            5 => StickDirection::Down,
            6 => StickDirection::LeftDown,
            7 => StickDirection::Left,
            8 => StickDirection::LeftUp,
            other => return Err(MappingError::UnknownDirection(other)),
        };
        Ok(direction)
    }

    /// The target direction, or `None` while centered
    pub fn direction(self) -> Option<Direction> {
        match self {
            StickDirection::Centered => None,
            StickDirection::Up => Some(Direction::Up),
            StickDirection::RightUp => Some(Direction::RightUp),
            StickDirection::Right => Some(Direction::Right),
            StickDirection::RightDown => Some(Direction::RightDown),
            StickDirection::Down => Some(Direction::Down),
            StickDirection::LeftDown => Some(Direction::LeftDown),
            StickDirection::Left => Some(Direction::Left),
            StickDirection::LeftUp => Some(Direction::LeftUp),
        }
    }

    pub fn is_centered(self) -> bool {
        self == StickDirection::Centered
    }
}

impl From<Direction> for StickDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => StickDirection::Up,
            Direction::RightUp => StickDirection::RightUp,
            Direction::Right => StickDirection::Right,
            Direction::RightDown => StickDirection::RightDown,
            Direction::Down => StickDirection::Down,
            Direction::LeftDown => StickDirection::LeftDown,
            Direction::Left => StickDirection::Left,
            Direction::LeftUp => StickDirection::LeftUp,
        }
    }
}

impl fmt::Display for StickDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction() {
            Some(direction) => direction.fmt(f),
            None => write!(f, "Centered"),
        }
    }
}

/// Fixed-size storage with exactly one value per [`Direction`]
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionMap<T>([T; 8]);

impl<T> DirectionMap<T> {
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        Self(Direction::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &T)> {
        Direction::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut()
    }
}

impl<T> Index<Direction> for DirectionMap<T> {
    type Output = T;

    fn index(&self, direction: Direction) -> &T {
        &self.0[direction.slot()]
    }
}

impl<T> IndexMut<Direction> for DirectionMap<T> {
    fn index_mut(&mut self, direction: Direction) -> &mut T {
        &mut self.0[direction.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_codes_roundtrip() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_code(direction.code()).unwrap(), direction);
        }
        assert_eq!(StickDirection::from_code(0).unwrap(), StickDirection::Centered);
    }

    #[test]
    fn test_centered_code_is_not_a_target() {
        assert!(matches!(
            Direction::from_code(0),
            Err(MappingError::UnknownDirection(0))
        ));
        assert!(Direction::from_code(9).is_err());
    }

    #[test]
    fn test_diagonal_components() {
        assert_eq!(
            Direction::RightUp.components(),
            Some((Direction::Right, Direction::Up))
        );
        assert_eq!(
            Direction::LeftDown.components(),
            Some((Direction::Left, Direction::Down))
        );
        assert_eq!(Direction::Up.components(), None);
    }

    #[test]
    fn test_direction_map_indexing() {
        let mut map = DirectionMap::from_fn(|d| d.code());
        assert_eq!(map[Direction::Left], 7);
        map[Direction::Left] = 42;
        assert_eq!(map[Direction::Left], 42);
        assert_eq!(map.iter().count(), 8);
    }
}
