//! # Game Module
//!
//! Grid state, movement resolution and turn management.
//!
//! This module contains the fundamental building blocks of Hedgerow:
//! - Coordinates and cardinal directions
//! - The grid with its walls and characters subsystems
//! - Single-move resolution and the enemy turn
//! - The turn controller and the session that ties everything together

pub mod character;
pub mod characters;
pub mod enemy_turn;
pub mod events;
pub mod grid;
pub mod session;
pub mod turn;
pub mod walls;

pub use character::*;
pub use characters::*;
pub use enemy_turn::*;
pub use events::*;
pub use grid::*;
pub use session::*;
pub use turn::*;
pub use walls::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A cell address on the grid.
///
/// Coordinates are plain values and may lie outside the grid; enemies are
/// spawned off-grid and walk in.
///
/// # Examples
///
/// ```
/// use hedgerow::Coords;
///
/// let c = Coords::new(2, 3);
/// assert_eq!(c.translated(1, -1), Coords::new(3, 2));
/// assert_eq!(c.manhattan_distance(Coords::new(0, 0)), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coords {
    pub col: i32,
    pub row: i32,
}

impl Coords {
    /// Creates a new coordinate.
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Returns this coordinate moved by `(dx, dy)`.
    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.col + dx, self.row + dy)
    }

    /// Calculates the Manhattan distance to another coordinate.
    pub fn manhattan_distance(self, other: Coords) -> u32 {
        ((self.col - other.col).abs() + (self.row - other.row).abs()) as u32
    }

    /// Returns the 4 cardinal neighbours in `Direction::cardinal()` order.
    pub fn cardinal_neighbours(self) -> [Coords; 4] {
        Direction::cardinal().map(|direction| {
            let (dx, dy) = direction.to_delta();
            self.translated(dx, dy)
        })
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl std::ops::Add for Coords {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.col + other.col, self.row + other.row)
    }
}

impl std::ops::Sub for Coords {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.col - other.col, self.row - other.row)
    }
}

/// Cardinal movement directions. Rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a `(dx, dy)` step.
    ///
    /// # Examples
    ///
    /// ```
    /// use hedgerow::Direction;
    ///
    /// assert_eq!(Direction::North.to_delta(), (0, -1));
    /// assert_eq!(Direction::East.to_delta(), (1, 0));
    /// ```
    pub fn to_delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Converts a step to a direction.
    ///
    /// Returns None for the zero step and for diagonals.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }

    /// Returns the 4 cardinal directions.
    pub fn cardinal() -> [Direction; 4] {
        [
            Direction::North,
            Direction::West,
            Direction::East,
            Direction::South,
        ]
    }
}

/// Unique identifier for characters on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(Uuid);

impl CharacterId {
    /// Creates a new unique character ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coords_creation() {
        let c = Coords::new(5, 10);
        assert_eq!(c.col, 5);
        assert_eq!(c.row, 10);
    }

    #[test]
    fn test_coords_arithmetic() {
        let a = Coords::new(5, 10);
        let b = Coords::new(3, 2);
        assert_eq!(a + b, Coords::new(8, 12));
        assert_eq!(a - b, Coords::new(2, 8));
        assert_eq!(a.translated(-1, 0), Coords::new(4, 10));
    }

    #[test]
    fn test_cardinal_neighbours() {
        let neighbours = Coords::new(5, 5).cardinal_neighbours();
        assert_eq!(neighbours.len(), 4);
        assert!(neighbours.contains(&Coords::new(5, 4)));
        assert!(neighbours.contains(&Coords::new(4, 5)));
        assert!(neighbours.contains(&Coords::new(6, 5)));
        assert!(neighbours.contains(&Coords::new(5, 6)));
        assert!(!neighbours.contains(&Coords::new(4, 4)));
    }

    #[test]
    fn test_direction_round_trip() {
        for direction in Direction::cardinal() {
            let (dx, dy) = direction.to_delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(direction));
        }
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(0, 0), None);
    }

    #[test]
    fn test_character_id_uniqueness() {
        assert_ne!(CharacterId::new(), CharacterId::new());
    }
}
