//! # Pathfinding
//!
//! Shortest-path distance fields for enemy navigation.
//!
//! The search runs outward from a single target cell with unit edge weights
//! over 4-connected cells. Walls are hard obstacles, and so is any cell in
//! the caller's obstacle set. Each reached cell records the neighbour it was
//! reached from, so reading the field at an enemy's cell yields its next
//! step toward the target.

use crate::{Coords, Direction, GridGeometry, Walls};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Distance and backpointer for one cell of a [`PathMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathCell {
    /// Steps to the target, None when unreachable
    pub distance: Option<u32>,
    /// Neighbour one step closer to the target
    pub source: Option<Coords>,
}

/// Same-shape table of [`PathCell`]s for one target.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMap {
    geometry: GridGeometry,
    target: Coords,
    cells: Vec<PathCell>,
}

impl PathMap {
    fn unreached(geometry: GridGeometry, target: Coords) -> Self {
        Self {
            geometry,
            target,
            cells: vec![PathCell::default(); geometry.cell_count()],
        }
    }

    pub fn target(&self) -> Coords {
        self.target
    }

    pub fn get(&self, coords: Coords) -> Option<&PathCell> {
        self.geometry.index(coords).map(|i| &self.cells[i])
    }

    /// Steps from `coords` to the target. None off-grid or unreachable.
    pub fn distance(&self, coords: Coords) -> Option<u32> {
        self.get(coords).and_then(|cell| cell.distance)
    }

    /// The neighbour to step onto from `coords`.
    pub fn next_step(&self, coords: Coords) -> Option<Coords> {
        self.get(coords).and_then(|cell| cell.source)
    }

    /// Number of cells that reach the target.
    pub fn reachable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.distance.is_some()).count()
    }
}

/// Builds the distance field toward `target`.
///
/// Whenever several unvisited cells share the smallest tentative distance,
/// one is picked uniformly at random, so equally short routes vary from
/// turn to turn. A target outside the grid yields an all-unreachable map.
pub fn shortest_paths_to(
    target: Coords,
    geometry: GridGeometry,
    walls: &Walls,
    obstacles: &HashSet<Coords>,
    rng: &mut StdRng,
) -> PathMap {
    let mut map = PathMap::unreached(geometry, target);
    let Some(target_index) = geometry.index(target) else {
        return map;
    };

    let mut visited = vec![false; map.cells.len()];
    let mut queued = vec![false; map.cells.len()];
    map.cells[target_index].distance = Some(0);
    queued[target_index] = true;
    let mut frontier = vec![target];

    while let Some(nearest) = frontier
        .iter()
        .filter_map(|&c| map.distance(c))
        .min()
    {
        let candidates: Vec<usize> = frontier
            .iter()
            .enumerate()
            .filter(|&(_, c)| map.distance(*c) == Some(nearest))
            .map(|(i, _)| i)
            .collect();
        let Some(&pick) = candidates.choose(rng) else {
            break;
        };
        let current = frontier.swap_remove(pick);
        let Some(current_index) = geometry.index(current) else {
            continue;
        };
        visited[current_index] = true;

        for direction in Direction::cardinal() {
            let (dx, dy) = direction.to_delta();
            let neighbour = current.translated(dx, dy);
            let Some(neighbour_index) = geometry.index(neighbour) else {
                continue;
            };
            if visited[neighbour_index]
                || obstacles.contains(&neighbour)
                || walls.blocks(current, dx, dy).is_some()
            {
                continue;
            }

            let candidate = nearest + 1;
            let cell = &mut map.cells[neighbour_index];
            if cell.distance.map_or(true, |d| candidate < d) {
                cell.distance = Some(candidate);
                cell.source = Some(current);
                if !queued[neighbour_index] {
                    queued[neighbour_index] = true;
                    frontier.push(neighbour);
                }
            }
        }
    }

    map
}
