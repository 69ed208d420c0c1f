//! # Wall Layouts
//!
//! Random interior wall placement that keeps the grid connected.
//!
//! Every interior edge is a candidate. Candidates are tried in random order
//! and kept only if the grid remains a single connected region with the
//! walls placed so far.

use crate::{Coords, Direction, GridGeometry, HedgerowResult, Wall, WallLayoutGenerator, Walls};
use log::{debug, warn};
use pathfinding::prelude::bfs_reach;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Generator placing walls on random interior edges.
#[derive(Debug, Clone, Default)]
pub struct RandomWallLayout;

impl RandomWallLayout {
    /// Creates a new layout generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use hedgerow::{RandomWallLayout, WallLayoutGenerator};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let walls = RandomWallLayout::new().generate_layout(5, 5, &mut rng).unwrap();
    /// assert_eq!(walls.len(), 5);
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Every edge between two in-bounds cells.
    pub fn interior_edges(dimension: i32) -> Vec<Wall> {
        let mut edges = Vec::new();
        for row in 0..dimension {
            for col in 0..dimension {
                if row > 0 {
                    edges.push(Wall::horizontal(Coords::new(col, row)));
                }
                if col > 0 {
                    edges.push(Wall::vertical(Coords::new(col, row)));
                }
            }
        }
        edges
    }
}

impl WallLayoutGenerator for RandomWallLayout {
    fn generate_layout(
        &self,
        count: usize,
        dimension: i32,
        rng: &mut StdRng,
    ) -> HedgerowResult<Vec<Wall>> {
        let mut candidates = Self::interior_edges(dimension);
        candidates.shuffle(rng);

        let mut placed = Vec::with_capacity(count);
        for candidate in candidates {
            if placed.len() == count {
                break;
            }
            placed.push(candidate);
            let walls = Walls::with_walls(placed.clone(), Vec::new());
            if !is_connected(&walls, dimension) {
                placed.pop();
            }
        }

        if placed.len() < count {
            warn!(
                "Only {} of {} walls fit on a {}x{} grid without closing off a cell",
                placed.len(),
                count,
                dimension,
                dimension
            );
        }
        debug!("Generated layout: {:?}", placed);
        Ok(placed)
    }

    fn generator_type(&self) -> &'static str {
        "RandomWallLayout"
    }
}

/// Whether every cell of the grid can reach every other past `walls`.
pub fn is_connected(walls: &Walls, dimension: i32) -> bool {
    let geometry = GridGeometry::new(dimension, 1.0);
    if geometry.cell_count() == 0 {
        return true;
    }
    let reached = bfs_reach(Coords::new(0, 0), |&cell| {
        Direction::cardinal().into_iter().filter_map(move |direction| {
            let (dx, dy) = direction.to_delta();
            let next = cell.translated(dx, dy);
            (geometry.in_bounds(next) && walls.blocks(cell, dx, dy).is_none()).then_some(next)
        })
    })
    .count();
    reached == geometry.cell_count()
}
