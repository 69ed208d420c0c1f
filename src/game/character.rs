//! # Characters
//!
//! The agents that stand on the grid: one player and any number of enemies.

use crate::{CharacterId, Coords};
use serde::{Deserialize, Serialize};

/// Which side a character fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Player,
    Enemy,
}

/// Horizontal facing, derived from the last non-zero `dx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Facing that matches the sign of `dx`, or None when `dx` is zero.
    pub fn from_dx(dx: i32) -> Option<Facing> {
        match dx.signum() {
            1 => Some(Facing::Right),
            -1 => Some(Facing::Left),
            _ => None,
        }
    }
}

/// A character on (or just outside) the grid.
///
/// Characters are identified by [`CharacterId`], never by coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique identity
    pub id: CharacterId,
    /// Player or enemy
    pub role: Role,
    /// Current cell
    pub coords: Coords,
    /// Which way the sprite faces
    pub facing: Facing,
    /// Set once an enemy has walked in from outside the grid
    pub entered: bool,
}

impl Character {
    /// Creates a character with a fresh id, facing right.
    pub fn new(role: Role, coords: Coords) -> Self {
        Self {
            id: CharacterId::new(),
            role,
            coords,
            facing: Facing::Right,
            entered: false,
        }
    }

    /// Creates the player character.
    pub fn player(coords: Coords) -> Self {
        Self::new(Role::Player, coords)
    }

    /// Creates an enemy character.
    pub fn enemy(coords: Coords) -> Self {
        Self::new(Role::Enemy, coords)
    }

    pub fn is_player(&self) -> bool {
        self.role == Role::Player
    }

    pub fn is_enemy(&self) -> bool {
        self.role == Role::Enemy
    }

    /// Whether bumping into `other` counts as an attack rather than a blocked move.
    pub fn is_hostile_to(&self, other: &Character) -> bool {
        self.role != other.role
    }
}
