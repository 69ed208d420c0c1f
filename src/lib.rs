//! # Hedgerow
//!
//! Turn-based movement and pathfinding engine for a small walled tile grid.
//!
//! ## Architecture Overview
//!
//! The engine decides, each turn, whether a character may step into an
//! adjacent cell and routes every enemy toward the player afterwards.
//! Rendering, audio and input wiring live outside this crate; the core only
//! consumes move requests and produces move outcomes plus a feed of
//! [`GridEvent`]s that a presentation layer can animate.
//!
//! - **Grid**: owns the geometry and composes the walls and characters subsystems
//! - **Walls**: interior and boundary wall sets, answering "is this step blocked"
//! - **Characters**: the roster, single-move resolution and the enemy turn
//! - **Turn controller**: gates player input against delayed continuations
//! - **Generation**: wall layouts that never disconnect the grid
//!
//! ```
//! use hedgerow::{GameConfig, GameSession, PlayerInput, Direction};
//!
//! let mut session = GameSession::new(GameConfig::for_testing(7)).unwrap();
//! session.handle_input(PlayerInput::Move(Direction::East)).unwrap();
//! session.settle().unwrap();
//! assert!(session.controller().is_ready());
//! ```

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Hedgerow engine.
#[derive(thiserror::Error, Debug)]
pub enum HedgerowError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Configuration rejected during validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// More than one character claims the same cell
    #[error("{count} characters occupy {at}")]
    OccupancyConflict { at: Coords, count: usize },
}

/// Result type used throughout the Hedgerow codebase.
pub type HedgerowResult<T> = Result<T, HedgerowError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration constants.
pub mod config {
    /// Default number of cells per grid side
    pub const DEFAULT_DIMENSION: i32 = 5;

    /// Default number of interior walls per layout
    pub const DEFAULT_WALL_COUNT: usize = 5;

    /// Default cell size in presentation units
    pub const DEFAULT_CELL_SIZE: f32 = 100.0;

    /// Duration of a bump (blocked move or attack)
    pub const BUMP_DELAY: f32 = 0.1;

    /// Duration of a committed one-cell step
    pub const STEP_DELAY: f32 = 0.05;

    /// Fade-out time for walls removed by a regeneration
    pub const WALL_FADE_TIME: f32 = 0.2;

    /// Retry rounds per enemy turn before unresolved enemies give up
    pub const MAX_ENEMY_ROUNDS: usize = 5;

    /// Ranking distance given to enemies standing outside the grid
    pub const OFF_GRID_DISTANCE: u32 = 1_000_000;

    /// Largest accepted number of cells per grid side
    pub const MAX_DIMENSION: i32 = 128;

    /// Frames per second used by the headless CLI loop
    pub const TARGET_FPS: u64 = 60;
}
