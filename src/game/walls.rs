//! # Walls
//!
//! Wall segments and the subsystem that owns the current layout.
//!
//! A wall sits on the edge between two orthogonally adjacent cells. Two
//! disjoint sets exist at all times: the interior set, replaced on every
//! regeneration, and the boundary set along the perimeter, recomputed only
//! when the grid dimension changes.

use crate::config::WALL_FADE_TIME;
use crate::{Coords, GridEvent, HedgerowResult, WallLayoutGenerator};
use log::{info, trace};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Which edge of its anchor cell a wall lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Top edge of the anchor cell
    Horizontal,
    /// Left edge of the anchor cell
    Vertical,
}

/// A blocking edge anchored at a cell.
///
/// A horizontal wall anchored at `(c, r)` separates `(c, r - 1)` from
/// `(c, r)`; a vertical one separates `(c - 1, r)` from `(c, r)`.
///
/// # Examples
///
/// ```
/// use hedgerow::{Coords, Wall};
///
/// let wall = Wall::horizontal(Coords::new(2, 2));
/// assert!(wall.blocks(Coords::new(2, 2), 0, -1));
/// assert!(wall.blocks(Coords::new(2, 1), 0, 1));
/// assert!(!wall.blocks(Coords::new(2, 2), 1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wall {
    pub anchor: Coords,
    pub orientation: Orientation,
}

impl Wall {
    pub fn new(anchor: Coords, orientation: Orientation) -> Self {
        Self {
            anchor,
            orientation,
        }
    }

    pub fn horizontal(anchor: Coords) -> Self {
        Self::new(anchor, Orientation::Horizontal)
    }

    pub fn vertical(anchor: Coords) -> Self {
        Self::new(anchor, Orientation::Vertical)
    }

    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    /// The two cells this wall separates, in (before, anchor) order.
    pub fn separated_cells(&self) -> (Coords, Coords) {
        match self.orientation {
            Orientation::Horizontal => (self.anchor.translated(0, -1), self.anchor),
            Orientation::Vertical => (self.anchor.translated(-1, 0), self.anchor),
        }
    }

    /// Whether this wall lies between `origin` and `origin + (dx, dy)`.
    ///
    /// Only cardinal steps can be blocked.
    pub fn blocks(&self, origin: Coords, dx: i32, dy: i32) -> bool {
        let target = origin.translated(dx, dy);
        let (before, after) = self.separated_cells();
        match self.orientation {
            Orientation::Horizontal if dx == 0 && dy.abs() == 1 => {
                (origin == before && target == after) || (origin == after && target == before)
            }
            Orientation::Vertical if dy == 0 && dx.abs() == 1 => {
                (origin == before && target == after) || (origin == after && target == before)
            }
            _ => false,
        }
    }
}

/// Owns the interior and boundary wall sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Walls {
    interior: Vec<Wall>,
    boundary: Vec<Wall>,
}

impl Walls {
    /// Creates an empty wall set with no boundary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a wall set with explicit interior and boundary walls.
    pub fn with_walls(interior: Vec<Wall>, boundary: Vec<Wall>) -> Self {
        Self { interior, boundary }
    }

    pub fn interior(&self) -> &[Wall] {
        &self.interior
    }

    pub fn boundary(&self) -> &[Wall] {
        &self.boundary
    }

    /// Iterates interior walls, then boundary walls.
    pub fn iter(&self) -> impl Iterator<Item = &Wall> {
        self.interior.iter().chain(self.boundary.iter())
    }

    /// Replaces the interior layout with `count` fresh walls and recomputes
    /// the boundary for `dimension`.
    ///
    /// The discarded interior walls are reported for fading out.
    pub fn regenerate(
        &mut self,
        count: usize,
        dimension: i32,
        generator: &dyn WallLayoutGenerator,
        rng: &mut StdRng,
        events: &mut Vec<GridEvent>,
    ) -> HedgerowResult<()> {
        let layout = generator.generate_layout(count, dimension, rng)?;
        let previous = std::mem::replace(&mut self.interior, layout);
        if !previous.is_empty() {
            events.push(GridEvent::WallsRemoved {
                walls: previous,
                fade: WALL_FADE_TIME,
            });
        }
        events.push(GridEvent::WallsPlaced {
            walls: self.interior.clone(),
            boundary: false,
        });

        self.boundary = generator.generate_boundary(dimension);
        events.push(GridEvent::WallsPlaced {
            walls: self.boundary.clone(),
            boundary: true,
        });

        info!(
            "{} placed {} interior and {} boundary walls",
            generator.generator_type(),
            self.interior.len(),
            self.boundary.len()
        );
        Ok(())
    }

    /// Swaps in a new boundary set, e.g. after the dimension changed.
    pub fn set_boundary(&mut self, boundary: Vec<Wall>, events: &mut Vec<GridEvent>) {
        self.boundary = boundary;
        events.push(GridEvent::WallsPlaced {
            walls: self.boundary.clone(),
            boundary: true,
        });
    }

    /// Returns the wall separating `origin` from `origin + (dx, dy)`, if any.
    pub fn blocks(&self, origin: Coords, dx: i32, dy: i32) -> Option<&Wall> {
        let wall = self.iter().find(|wall| wall.blocks(origin, dx, dy));
        if let Some(wall) = wall {
            trace!("step {} by ({}, {}) blocked by {:?}", origin, dx, dy, wall);
        }
        wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RandomWallLayout;
    use rand::SeedableRng;

    #[test]
    fn test_horizontal_wall_blocks_both_ways() {
        let wall = Wall::horizontal(Coords::new(1, 1));
        assert!(wall.blocks(Coords::new(1, 1), 0, -1));
        assert!(wall.blocks(Coords::new(1, 0), 0, 1));
        assert!(!wall.blocks(Coords::new(1, 1), 0, 1));
        assert!(!wall.blocks(Coords::new(0, 1), 1, 0));
        assert!(!wall.blocks(Coords::new(2, 1), 0, -1));
    }

    #[test]
    fn test_vertical_wall_blocks_both_ways() {
        let wall = Wall::vertical(Coords::new(3, 2));
        assert!(wall.blocks(Coords::new(3, 2), -1, 0));
        assert!(wall.blocks(Coords::new(2, 2), 1, 0));
        assert!(!wall.blocks(Coords::new(3, 2), 1, 0));
        assert!(!wall.blocks(Coords::new(3, 2), 0, -1));
    }

    #[test]
    fn test_diagonal_never_blocked() {
        let wall = Wall::vertical(Coords::new(1, 1));
        assert!(!wall.blocks(Coords::new(0, 0), 1, 1));
        assert!(!wall.blocks(Coords::new(1, 1), -1, -1));
    }

    #[test]
    fn test_blocks_checks_interior_then_boundary() {
        let interior = vec![Wall::vertical(Coords::new(1, 0))];
        let boundary = RandomWallLayout::new().generate_boundary(2);
        let walls = Walls::with_walls(interior, boundary);

        assert_eq!(
            walls.blocks(Coords::new(0, 0), 1, 0),
            Some(&Wall::vertical(Coords::new(1, 0)))
        );
        assert_eq!(
            walls.blocks(Coords::new(0, 0), -1, 0),
            Some(&Wall::vertical(Coords::new(0, 0)))
        );
        assert_eq!(walls.blocks(Coords::new(0, 0), 0, 1), None);
    }

    #[test]
    fn test_regenerate_reports_removed_walls() {
        let generator = RandomWallLayout::new();
        let mut rng = StdRng::seed_from_u64(3);
        let mut walls = Walls::new();
        let mut events = Vec::new();

        walls.regenerate(4, 5, &generator, &mut rng, &mut events).unwrap();
        assert_eq!(walls.interior().len(), 4);
        assert_eq!(walls.boundary().len(), 20);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GridEvent::WallsRemoved { .. })));

        let first_layout = walls.interior().to_vec();
        events.clear();
        walls.regenerate(4, 5, &generator, &mut rng, &mut events).unwrap();
        assert!(events.iter().any(|e| matches!(
            e,
            GridEvent::WallsRemoved { walls, .. } if *walls == first_layout
        )));
    }
}
