//! # Generation Module
//!
//! Game configuration and procedural wall layouts.
//!
//! A layout generator decides where interior walls go. Whatever it does, it
//! must never cut any cell off from the rest of the grid: enemy routing
//! assumes every cell can reach the player.

pub mod layout;

pub use layout::*;

use crate::config::{
    BUMP_DELAY, DEFAULT_CELL_SIZE, DEFAULT_DIMENSION, DEFAULT_WALL_COUNT, MAX_DIMENSION,
    MAX_ENEMY_ROUNDS, STEP_DELAY,
};
use crate::{Coords, HedgerowError, HedgerowResult, MoveTimings, Wall};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a game session.
///
/// Controls the grid size, how many walls and enemies are generated, and
/// the animation timings handed back with every move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Random seed for reproducible games
    pub seed: u64,
    /// Cells per grid side
    pub dimension: i32,
    /// Cell size in presentation units
    pub cell_size: f32,
    /// Interior walls per layout
    pub wall_count: usize,
    /// Enemies spawned around the grid at setup
    pub enemy_count: usize,
    /// Player starting cell; the centre when None
    pub player_start: Option<Coords>,
    /// Delay of a blocked move or attack
    pub bump_delay: f32,
    /// Delay of a committed step
    pub step_delay: f32,
    /// Retry rounds per enemy turn
    pub max_enemy_rounds: usize,
}

impl GameConfig {
    /// Creates a default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use hedgerow::GameConfig;
    ///
    /// let config = GameConfig::new(12345);
    /// assert_eq!(config.dimension, 5);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            dimension: DEFAULT_DIMENSION,
            cell_size: DEFAULT_CELL_SIZE,
            wall_count: DEFAULT_WALL_COUNT,
            enemy_count: 3,
            player_start: None,
            bump_delay: BUMP_DELAY,
            step_delay: STEP_DELAY,
            max_enemy_rounds: MAX_ENEMY_ROUNDS,
        }
    }

    /// Creates a small configuration for testing with one enemy.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            wall_count: 3,
            enemy_count: 1,
            ..Self::new(seed)
        }
    }

    /// Parses a configuration from JSON. Missing fields take default values.
    pub fn from_json(json: &str) -> HedgerowResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> HedgerowResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the configuration to JSON.
    pub fn to_json(&self) -> HedgerowResult<String> {
        serde_json::to_string_pretty(self).map_err(HedgerowError::from)
    }

    /// Where the player starts.
    pub fn player_start(&self) -> Coords {
        self.player_start
            .unwrap_or_else(|| Coords::new(self.dimension / 2, self.dimension / 2))
    }

    /// Move timings derived from the configured delays.
    pub fn timings(&self) -> MoveTimings {
        MoveTimings {
            bump: self.bump_delay,
            step: self.step_delay,
        }
    }

    /// Rejects configurations the engine cannot run.
    pub fn validate(&self) -> HedgerowResult<()> {
        if !(1..=MAX_DIMENSION).contains(&self.dimension) {
            return Err(HedgerowError::InvalidConfig(format!(
                "dimension must be between 1 and {}, got {}",
                MAX_DIMENSION, self.dimension
            )));
        }
        for (name, value) in [
            ("cell_size", self.cell_size),
            ("bump_delay", self.bump_delay),
            ("step_delay", self.step_delay),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(HedgerowError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.max_enemy_rounds == 0 {
            return Err(HedgerowError::InvalidConfig(
                "max_enemy_rounds must be at least 1".to_string(),
            ));
        }
        let start = self.player_start();
        if !(0..self.dimension).contains(&start.col) || !(0..self.dimension).contains(&start.row) {
            return Err(HedgerowError::InvalidConfig(format!(
                "player start {} is outside a {}x{} grid",
                start, self.dimension, self.dimension
            )));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Source of wall layouts.
///
/// Implementations must keep every in-bounds cell connected to every other.
pub trait WallLayoutGenerator {
    /// Generates up to `count` interior walls for a `dimension`-sized grid.
    fn generate_layout(
        &self,
        count: usize,
        dimension: i32,
        rng: &mut StdRng,
    ) -> HedgerowResult<Vec<Wall>>;

    /// Generates exactly the perimeter walls, one per outer cell edge.
    fn generate_boundary(&self, dimension: i32) -> Vec<Wall> {
        let mut walls = Vec::with_capacity(4 * dimension.max(0) as usize);
        for i in 0..dimension {
            walls.push(Wall::horizontal(Coords::new(i, 0)));
            walls.push(Wall::horizontal(Coords::new(i, dimension)));
            walls.push(Wall::vertical(Coords::new(0, i)));
            walls.push(Wall::vertical(Coords::new(dimension, i)));
        }
        walls
    }

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GameConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_game_config_creation() {
        let config = GameConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.player_start(), Coords::new(2, 2));
        assert_eq!(config.timings(), MoveTimings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = GameConfig::new(1);
        config.dimension = 0;
        assert!(matches!(
            config.validate(),
            Err(HedgerowError::InvalidConfig(_))
        ));

        let mut config = GameConfig::new(1);
        config.dimension = 100_000;
        assert!(matches!(
            config.validate(),
            Err(HedgerowError::InvalidConfig(_))
        ));
        config.dimension = MAX_DIMENSION;
        assert!(config.validate().is_ok());

        let mut config = GameConfig::new(1);
        config.step_delay = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::new(1);
        config.max_enemy_rounds = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::new(1);
        config.player_start = Some(Coords::new(5, 0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = GameConfig::from_json(r#"{ "seed": 9, "dimension": 7 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.dimension, 7);
        assert_eq!(config.wall_count, DEFAULT_WALL_COUNT);
        assert_eq!(config.player_start(), Coords::new(3, 3));

        assert!(GameConfig::from_json(r#"{ "dimension": -2 }"#).is_err());
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(HedgerowError::Serde(_))
        ));
    }

    #[test]
    fn test_config_load_from_file() {
        let config = GameConfig::for_testing(33);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_json().unwrap().as_bytes()).unwrap();

        let loaded = GameConfig::load(file.path()).unwrap();
        assert_eq!(loaded, config);
        assert!(matches!(
            GameConfig::load("/definitely/not/here.json"),
            Err(HedgerowError::Io(_))
        ));
    }
}
