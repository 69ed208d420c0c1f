//! # Grid
//!
//! The square board. The grid owns its geometry and the walls and
//! characters subsystems, and lends both a [`GridContext`] when they need
//! to ask about the other.

use crate::config::MAX_DIMENSION;
use crate::{
    Character, CharacterId, Characters, Coords, EnemyTurn, GridEvent, HedgerowError,
    HedgerowResult, MoveOutcome, MoveTimings, Wall, WallLayoutGenerator, Walls,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Dimension and cell size, plus the bounds arithmetic built on them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Number of cells per side
    pub dimension: i32,
    /// Size of one cell in presentation units
    pub cell_size: f32,
}

impl GridGeometry {
    pub fn new(dimension: i32, cell_size: f32) -> Self {
        Self {
            dimension,
            cell_size,
        }
    }

    /// Whether `coords` addresses a cell on the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use hedgerow::{Coords, GridGeometry};
    ///
    /// let geometry = GridGeometry::new(5, 100.0);
    /// assert!(geometry.in_bounds(Coords::new(4, 0)));
    /// assert!(!geometry.in_bounds(Coords::new(5, 0)));
    /// assert!(!geometry.in_bounds(Coords::new(0, -1)));
    /// ```
    pub fn in_bounds(&self, coords: Coords) -> bool {
        coords.col >= 0 && coords.col < self.dimension && coords.row >= 0 && coords.row < self.dimension
    }

    /// Nearest in-bounds cell, clamping each component to `[0, N - 1]`.
    pub fn clamp(&self, coords: Coords) -> Coords {
        let max = (self.dimension - 1).max(0);
        Coords::new(coords.col.clamp(0, max), coords.row.clamp(0, max))
    }

    /// Number of cells on the grid.
    pub fn cell_count(&self) -> usize {
        (self.dimension.max(0) as usize).pow(2)
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(&self, coords: Coords) -> Option<usize> {
        if self.in_bounds(coords) {
            Some((coords.row * self.dimension + coords.col) as usize)
        } else {
            None
        }
    }

    /// Every in-bounds cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Coords> {
        let dimension = self.dimension.max(0);
        (0..dimension).flat_map(move |row| (0..dimension).map(move |col| Coords::new(col, row)))
    }

    /// Centre of a cell in presentation units.
    pub fn cell_center(&self, coords: Coords) -> (f32, f32) {
        let half = self.cell_size / 2.0;
        (
            self.cell_size * coords.col as f32 + half,
            self.cell_size * coords.row as f32 + half,
        )
    }

    /// Centre of the edge a wall lies on, in presentation units.
    pub fn wall_position(&self, wall: &Wall) -> (f32, f32) {
        let half = self.cell_size / 2.0;
        let x = self.cell_size * wall.anchor.col as f32;
        let y = self.cell_size * wall.anchor.row as f32;
        if wall.is_horizontal() {
            (x + half, y)
        } else {
            (x, y + half)
        }
    }

    /// Side length of the whole board in presentation units.
    pub fn edge_size(&self) -> f32 {
        self.cell_size * self.dimension as f32
    }
}

/// Shared geometry and wall queries lent to the characters subsystem.
pub struct GridContext<'a> {
    pub geometry: GridGeometry,
    pub walls: &'a Walls,
    pub events: &'a mut Vec<GridEvent>,
}

impl GridContext<'_> {
    pub fn in_bounds(&self, coords: Coords) -> bool {
        self.geometry.in_bounds(coords)
    }

    /// The wall blocking a cardinal step, if any.
    pub fn wall_between(&self, origin: Coords, dx: i32, dy: i32) -> Option<&Wall> {
        self.walls.blocks(origin, dx, dy)
    }
}

/// The board: geometry, walls, characters and the pending event feed.
#[derive(Debug, Clone)]
pub struct Grid {
    geometry: GridGeometry,
    walls: Walls,
    characters: Characters,
    events: Vec<GridEvent>,
}

impl Grid {
    /// Creates an empty grid with boundary walls and no interior walls.
    pub fn new(
        dimension: i32,
        cell_size: f32,
        generator: &dyn WallLayoutGenerator,
    ) -> HedgerowResult<Self> {
        check_dimension(dimension)?;

        let mut grid = Self {
            geometry: GridGeometry::new(dimension, cell_size),
            walls: Walls::new(),
            characters: Characters::new(MoveTimings::default()),
            events: Vec::new(),
        };
        grid.walls
            .set_boundary(generator.generate_boundary(dimension), &mut grid.events);
        Ok(grid)
    }

    /// Creates a grid with an explicit wall set, mostly for tests and tools.
    pub fn with_walls(dimension: i32, cell_size: f32, walls: Walls) -> Self {
        Self {
            geometry: GridGeometry::new(dimension, cell_size),
            walls,
            characters: Characters::new(MoveTimings::default()),
            events: Vec::new(),
        }
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    pub fn dimension(&self) -> i32 {
        self.geometry.dimension
    }

    pub fn walls(&self) -> &Walls {
        &self.walls
    }

    pub fn characters(&self) -> &Characters {
        &self.characters
    }

    pub fn in_bounds(&self, coords: Coords) -> bool {
        self.geometry.in_bounds(coords)
    }

    pub fn clamp(&self, coords: Coords) -> Coords {
        self.geometry.clamp(coords)
    }

    /// Replaces the timings used by move resolution.
    pub fn set_timings(&mut self, timings: MoveTimings) {
        self.characters.set_timings(timings);
    }

    /// Changes the dimension and recomputes the boundary walls for it.
    pub fn set_dimension(
        &mut self,
        dimension: i32,
        generator: &dyn WallLayoutGenerator,
    ) -> HedgerowResult<()> {
        check_dimension(dimension)?;
        if dimension != self.geometry.dimension {
            info!("Resizing grid from {} to {}", self.geometry.dimension, dimension);
            self.geometry.dimension = dimension;
            self.walls
                .set_boundary(generator.generate_boundary(dimension), &mut self.events);
        }
        Ok(())
    }

    /// Discards the interior walls and asks `generator` for `count` new ones.
    pub fn regenerate_walls(
        &mut self,
        count: usize,
        generator: &dyn WallLayoutGenerator,
        rng: &mut StdRng,
    ) -> HedgerowResult<()> {
        self.walls.regenerate(
            count,
            self.geometry.dimension,
            generator,
            rng,
            &mut self.events,
        )
    }

    /// Returns the wall blocking a cardinal step, if any.
    pub fn wall_between(&self, origin: Coords, dx: i32, dy: i32) -> Option<&Wall> {
        self.walls.blocks(origin, dx, dy)
    }

    /// Adds a character to the roster.
    pub fn add_character(&mut self, character: Character) -> CharacterId {
        self.characters.add_character(character)
    }

    /// Places `count` enemies one step outside the grid on distinct random
    /// perimeter spots. Returns their ids.
    pub fn spawn_enemies(&mut self, count: usize, rng: &mut StdRng) -> Vec<CharacterId> {
        let n = self.geometry.dimension;
        let mut spots: Vec<Coords> = (0..n)
            .flat_map(|i| {
                [
                    Coords::new(i, -1),
                    Coords::new(i, n),
                    Coords::new(-1, i),
                    Coords::new(n, i),
                ]
            })
            .filter(|spot| self.characters.iter().all(|c| c.coords != *spot))
            .collect();
        spots.shuffle(rng);

        let ids: Vec<CharacterId> = spots
            .into_iter()
            .take(count)
            .map(|spot| self.characters.add_character(Character::enemy(spot)))
            .collect();
        debug!("Spawned {} of {} requested enemies", ids.len(), count);
        ids
    }

    /// Resolves one move for one character. See [`Characters::move_character`].
    pub fn move_character(
        &mut self,
        id: CharacterId,
        dx: i32,
        dy: i32,
        ignore_walls: bool,
    ) -> HedgerowResult<MoveOutcome> {
        let mut ctx = GridContext {
            geometry: self.geometry,
            walls: &self.walls,
            events: &mut self.events,
        };
        self.characters
            .move_character(&mut ctx, id, dx, dy, ignore_walls)
    }

    /// Runs the enemy turn against the player's coordinate and returns the
    /// longest move delay it produced.
    pub fn move_enemies(
        &mut self,
        player: Coords,
        max_rounds: usize,
        rng: &mut StdRng,
    ) -> HedgerowResult<f32> {
        let mut ctx = GridContext {
            geometry: self.geometry,
            walls: &self.walls,
            events: &mut self.events,
        };
        EnemyTurn::new(max_rounds).run(&mut self.characters, &mut ctx, player, rng)
    }

    /// The character standing on `coords`, if any.
    pub fn character_at(&self, coords: Coords) -> HedgerowResult<Option<CharacterId>> {
        self.characters.character_at(coords)
    }

    /// Records a presentation event that did not come from a subsystem.
    pub fn push_event(&mut self, event: GridEvent) {
        self.events.push(event);
    }

    /// Hands out every pending event in emission order.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

}

fn check_dimension(dimension: i32) -> HedgerowResult<()> {
    if !(1..=MAX_DIMENSION).contains(&dimension) {
        return Err(HedgerowError::InvalidConfig(format!(
            "Grid dimension must be between 1 and {}, got {}",
            MAX_DIMENSION, dimension
        )));
    }
    Ok(())
}
