//! # Grid Events
//!
//! The abstract feed a presentation layer turns into animation.

use crate::{CharacterId, Coords, Facing, Wall};
use serde::{Deserialize, Serialize};

/// Something visible happened on the grid.
///
/// Events are appended in the order the engine produces them and drained
/// with [`crate::Grid::drain_events`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GridEvent {
    /// A character turned to face left or right
    FacingChanged {
        character: CharacterId,
        facing: Facing,
    },
    /// A character nudged toward `(dx, dy)` and back without moving
    Bumped {
        character: CharacterId,
        dx: i32,
        dy: i32,
        duration: f32,
    },
    /// A bump that landed on a hostile character
    Attacked {
        attacker: CharacterId,
        target: CharacterId,
    },
    /// A character slid from one cell to another
    Moved {
        character: CharacterId,
        from: Coords,
        to: Coords,
        duration: f32,
    },
    /// An enemy stepped onto the grid from outside
    EnemyEntered { character: CharacterId, at: Coords },
    /// Walls discarded by a regeneration, to be faded out
    WallsRemoved { walls: Vec<Wall>, fade: f32 },
    /// A freshly generated wall set, interior or boundary
    WallsPlaced { walls: Vec<Wall>, boundary: bool },
    /// Any running animation on the character should stop
    AnimationsCancelled { character: CharacterId },
}
