//! # Game Session
//!
//! Ties a configured grid, its turn controller and a seeded random number
//! generator together behind one input/advance surface.

use crate::generation::utils::create_rng;
use crate::{
    Character, Direction, GameConfig, Grid, GridEvent, HedgerowResult, MoveOutcome, PlayerInput,
    RandomWallLayout, TurnController,
};
use log::info;
use rand::rngs::StdRng;

/// A running game.
///
/// # Examples
///
/// ```
/// use hedgerow::{Direction, GameConfig, GameSession, PlayerInput};
///
/// let mut session = GameSession::new(GameConfig::for_testing(3)).unwrap();
/// let outcome = session.handle_input(PlayerInput::Move(Direction::North)).unwrap();
/// assert!(outcome.is_some());
/// assert!(!session.controller().is_ready());
///
/// session.settle().unwrap();
/// assert!(session.controller().is_ready());
/// ```
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    controller: TurnController,
    layout: RandomWallLayout,
    rng: StdRng,
    quit_requested: bool,
}

impl GameSession {
    /// Builds the grid, walls, player and enemies described by `config`.
    pub fn new(config: GameConfig) -> HedgerowResult<Self> {
        config.validate()?;

        let mut rng = create_rng(&config);
        let layout = RandomWallLayout::new();
        let mut grid = Grid::new(config.dimension, config.cell_size, &layout)?;
        grid.set_timings(config.timings());
        grid.regenerate_walls(config.wall_count, &layout, &mut rng)?;
        grid.add_character(Character::player(config.player_start()));
        grid.spawn_enemies(config.enemy_count, &mut rng);

        info!(
            "Started session: seed {}, {}x{} grid, {} walls, {} enemies",
            config.seed,
            config.dimension,
            config.dimension,
            grid.walls().interior().len(),
            grid.characters().enemy_ids().len()
        );

        Ok(Self {
            controller: TurnController::new(config.max_enemy_rounds),
            config,
            grid,
            layout,
            rng,
            quit_requested: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    pub fn player(&self) -> Option<&Character> {
        self.grid.characters().player()
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Feeds one input to the turn controller.
    ///
    /// Returns the player's move outcome when the input was resolved right
    /// away, or `None` when it was queued or was not a move.
    pub fn handle_input(&mut self, input: PlayerInput) -> HedgerowResult<Option<MoveOutcome>> {
        match input {
            PlayerInput::Move(direction) => self.move_player(direction),
            PlayerInput::Quit => {
                info!("Quit requested");
                self.quit_requested = true;
                Ok(None)
            }
        }
    }

    fn move_player(&mut self, direction: Direction) -> HedgerowResult<Option<MoveOutcome>> {
        let (dx, dy) = direction.to_delta();
        self.controller.handle_input(dx, dy, &mut self.grid)
    }

    /// Advances the session clock by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> HedgerowResult<()> {
        self.controller.advance(dt, &mut self.grid, &mut self.rng)
    }

    /// Runs every pending continuation. Returns the session time reached.
    pub fn settle(&mut self) -> HedgerowResult<f64> {
        self.controller.settle(&mut self.grid, &mut self.rng)
    }

    /// Replaces the interior walls with a fresh layout.
    pub fn regenerate_walls(&mut self) -> HedgerowResult<()> {
        self.grid
            .regenerate_walls(self.config.wall_count, &self.layout, &mut self.rng)
    }

    /// Hands out every event produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        self.grid.drain_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coords, HedgerowError};

    #[test]
    fn test_session_setup() {
        let mut session = GameSession::new(GameConfig::new(11)).unwrap();
        assert_eq!(session.player().unwrap().coords, Coords::new(2, 2));
        assert_eq!(session.grid().characters().enemy_ids().len(), 3);
        assert_eq!(session.grid().walls().interior().len(), 5);
        assert_eq!(session.grid().walls().boundary().len(), 20);

        for id in session.grid().characters().enemy_ids() {
            let enemy = session.grid().characters().get(id).unwrap();
            assert!(!session.grid().in_bounds(enemy.coords));
        }

        let events = session.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GridEvent::WallsPlaced { boundary: true, .. })));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = GameSession::new(GameConfig::new(77)).unwrap();
        let b = GameSession::new(GameConfig::new(77)).unwrap();
        assert_eq!(a.grid().walls().interior(), b.grid().walls().interior());
        let coords = |s: &GameSession| -> Vec<Coords> {
            s.grid().characters().iter().map(|c| c.coords).collect()
        };
        assert_eq!(coords(&a), coords(&b));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GameConfig::new(1);
        config.dimension = 0;
        assert!(matches!(
            GameSession::new(config),
            Err(HedgerowError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_quit_input() {
        let mut session = GameSession::new(GameConfig::for_testing(5)).unwrap();
        assert!(session.handle_input(PlayerInput::Quit).unwrap().is_none());
        assert!(session.is_quit_requested());
        assert!(session.controller().is_ready());
    }

    #[test]
    fn test_regenerate_walls_replaces_layout() {
        let mut session = GameSession::new(GameConfig::new(8)).unwrap();
        session.drain_events();
        session.regenerate_walls().unwrap();
        let events = session.drain_events();
        assert!(matches!(events.first(), Some(GridEvent::WallsRemoved { .. })));
        assert_eq!(session.grid().walls().interior().len(), 5);
    }
}
