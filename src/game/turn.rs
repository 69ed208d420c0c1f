//! # Turn Controller
//!
//! Gates player input against the delayed completion of the player's move
//! and the enemy turn that follows it.
//!
//! While `Locked`, input is recorded but not simulated. Only the latest
//! input survives, and it is replayed as soon as the controller is `Ready`
//! again.

use crate::config::MAX_ENEMY_ROUNDS;
use crate::{
    CharacterId, Coords, Grid, GridEvent, HedgerowError, HedgerowResult, MoveOutcome, Scheduler,
};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Whether the player may act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for player input
    Ready,
    /// A player move or enemy turn is in flight
    Locked,
}

/// Work to run once a delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnContinuation {
    PlayerMoveSettled { did_move: bool },
    EnemyTurnSettled,
}

/// Turn-gating state machine driven by a virtual clock.
///
/// The owner feeds input through [`handle_input`](Self::handle_input) and
/// moves time forward with [`advance`](Self::advance).
#[derive(Debug, Clone)]
pub struct TurnController {
    state: TurnState,
    queued_move: Option<(i32, i32)>,
    scheduler: Scheduler<TurnContinuation>,
    max_enemy_rounds: usize,
    turn_number: u64,
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new(MAX_ENEMY_ROUNDS)
    }
}

impl TurnController {
    pub fn new(max_enemy_rounds: usize) -> Self {
        Self {
            state: TurnState::Ready,
            queued_move: None,
            scheduler: Scheduler::new(),
            max_enemy_rounds,
            turn_number: 0,
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == TurnState::Ready
    }

    /// True when no continuation is waiting on the clock.
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    /// The input waiting for the lock to clear.
    pub fn queued_move(&self) -> Option<(i32, i32)> {
        self.queued_move
    }

    /// Number of player moves resolved so far, replays included.
    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    /// Current virtual time in seconds.
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// Handles one directional input.
    ///
    /// When `Ready` the move is resolved immediately and its outcome
    /// returned. When `Locked` the input replaces any queued one and `None`
    /// is returned.
    pub fn handle_input(
        &mut self,
        dx: i32,
        dy: i32,
        grid: &mut Grid,
    ) -> HedgerowResult<Option<MoveOutcome>> {
        match self.state {
            TurnState::Ready => self.begin_turn(dx, dy, grid).map(Some),
            TurnState::Locked => {
                if let Some((old_dx, old_dy)) = self.queued_move.replace((dx, dy)) {
                    debug!(
                        "Queued move ({}, {}) replaced by ({}, {})",
                        old_dx, old_dy, dx, dy
                    );
                }
                Ok(None)
            }
        }
    }

    /// Moves the clock forward by `dt` seconds, running every continuation
    /// that falls due.
    pub fn advance(&mut self, dt: f32, grid: &mut Grid, rng: &mut StdRng) -> HedgerowResult<()> {
        let until = self.scheduler.now() + f64::from(dt.max(0.0));
        self.run_until(until, grid, rng)
    }

    /// Runs continuations until nothing is pending, including any replayed
    /// move. Returns the time reached.
    pub fn settle(&mut self, grid: &mut Grid, rng: &mut StdRng) -> HedgerowResult<f64> {
        while let Some(due) = self.scheduler.next_due() {
            self.run_until(due, grid, rng)?;
        }
        Ok(self.scheduler.now())
    }

    fn run_until(&mut self, until: f64, grid: &mut Grid, rng: &mut StdRng) -> HedgerowResult<()> {
        while let Some(continuation) = self.scheduler.pop_due(until) {
            trace!("Running {:?} at {:.3}", continuation, self.scheduler.now());
            match continuation {
                TurnContinuation::PlayerMoveSettled { did_move: true } => {
                    let (_, player) = player_position(grid)?;
                    let delay = grid.move_enemies(player, self.max_enemy_rounds, rng)?;
                    self.scheduler
                        .schedule(delay, TurnContinuation::EnemyTurnSettled);
                }
                TurnContinuation::PlayerMoveSettled { did_move: false }
                | TurnContinuation::EnemyTurnSettled => self.unlock(grid)?,
            }
        }
        self.scheduler.advance_clock(until);
        Ok(())
    }

    fn begin_turn(&mut self, dx: i32, dy: i32, grid: &mut Grid) -> HedgerowResult<MoveOutcome> {
        let (player, _) = player_position(grid)?;

        grid.push_event(GridEvent::AnimationsCancelled { character: player });
        let outcome = grid.move_character(player, dx, dy, false)?;

        self.turn_number += 1;
        self.state = TurnState::Locked;
        self.scheduler.schedule(
            outcome.delay,
            TurnContinuation::PlayerMoveSettled {
                did_move: outcome.did_move,
            },
        );
        debug!(
            "Turn {}: player move ({}, {}) -> {:?}",
            self.turn_number, dx, dy, outcome
        );
        Ok(outcome)
    }

    fn unlock(&mut self, grid: &mut Grid) -> HedgerowResult<()> {
        self.state = TurnState::Ready;
        if let Some((dx, dy)) = self.queued_move.take() {
            info!("Replaying queued move ({}, {})", dx, dy);
            self.begin_turn(dx, dy, grid)?;
        }
        Ok(())
    }
}

fn player_position(grid: &Grid) -> HedgerowResult<(CharacterId, Coords)> {
    grid.characters()
        .player()
        .map(|player| (player.id, player.coords))
        .ok_or_else(|| HedgerowError::InvalidState("Grid has no player".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Character, RandomWallLayout, Wall, WallLayoutGenerator, Walls};
    use rand::SeedableRng;

    fn open_grid(dimension: i32, interior: Vec<Wall>) -> Grid {
        let boundary = RandomWallLayout::new().generate_boundary(dimension);
        Grid::with_walls(dimension, 100.0, Walls::with_walls(interior, boundary))
    }

    fn coords_of(grid: &Grid, id: CharacterId) -> Coords {
        grid.characters().get(id).unwrap().coords
    }

    #[test]
    fn test_bump_on_single_cell_grid() {
        let mut grid = open_grid(1, Vec::new());
        let player = grid.add_character(Character::player(Coords::new(0, 0)));
        let mut rng = StdRng::seed_from_u64(1);
        let mut controller = TurnController::default();

        let outcome = controller.handle_input(1, 0, &mut grid).unwrap().unwrap();
        assert!(!outcome.did_move);
        assert!((outcome.delay - 0.1).abs() < 1e-6);
        assert_eq!(coords_of(&grid, player), Coords::new(0, 0));
        assert_eq!(controller.state(), TurnState::Locked);

        controller.advance(0.05, &mut grid, &mut rng).unwrap();
        assert_eq!(controller.state(), TurnState::Locked);

        controller.advance(0.1, &mut grid, &mut rng).unwrap();
        assert!(controller.is_ready());
        assert!(controller.is_idle());
    }

    #[test]
    fn test_only_last_queued_input_is_replayed() {
        let mut grid = open_grid(5, Vec::new());
        let player = grid.add_character(Character::player(Coords::new(2, 2)));
        let mut rng = StdRng::seed_from_u64(2);
        let mut controller = TurnController::default();

        assert!(controller.handle_input(1, 0, &mut grid).unwrap().is_some());
        assert_eq!(coords_of(&grid, player), Coords::new(3, 2));

        assert!(controller.handle_input(0, 1, &mut grid).unwrap().is_none());
        assert!(controller.handle_input(-1, 0, &mut grid).unwrap().is_none());
        assert_eq!(controller.queued_move(), Some((-1, 0)));
        // Nothing simulated while locked
        assert_eq!(coords_of(&grid, player), Coords::new(3, 2));

        controller.settle(&mut grid, &mut rng).unwrap();
        assert_eq!(coords_of(&grid, player), Coords::new(2, 2));
        assert_eq!(controller.turn_number(), 2);
        assert_eq!(controller.queued_move(), None);
        assert!(controller.is_ready());
    }

    #[test]
    fn test_enemies_wait_for_player_move_delay() {
        let mut grid = open_grid(5, Vec::new());
        grid.add_character(Character::player(Coords::new(2, 2)));
        let enemy = grid.add_character(Character::enemy(Coords::new(0, 0)));
        let mut rng = StdRng::seed_from_u64(3);
        let mut controller = TurnController::default();

        controller.handle_input(1, 0, &mut grid).unwrap();
        controller.advance(0.01, &mut grid, &mut rng).unwrap();
        assert_eq!(coords_of(&grid, enemy), Coords::new(0, 0));

        controller.advance(0.1, &mut grid, &mut rng).unwrap();
        let distance = coords_of(&grid, enemy).manhattan_distance(Coords::new(3, 2));
        assert_eq!(distance, 4);
        assert!(controller.is_ready());
    }

    #[test]
    fn test_blocked_move_skips_enemy_turn() {
        let mut grid = open_grid(5, vec![Wall::vertical(Coords::new(3, 2))]);
        let player = grid.add_character(Character::player(Coords::new(2, 2)));
        let enemy = grid.add_character(Character::enemy(Coords::new(0, 0)));
        let mut rng = StdRng::seed_from_u64(4);
        let mut controller = TurnController::default();

        let outcome = controller.handle_input(1, 0, &mut grid).unwrap().unwrap();
        assert!(!outcome.did_move);
        controller.settle(&mut grid, &mut rng).unwrap();

        assert_eq!(coords_of(&grid, player), Coords::new(2, 2));
        assert_eq!(coords_of(&grid, enemy), Coords::new(0, 0));
        assert!(controller.is_ready());
    }

    #[test]
    fn test_input_cancels_player_animations_first() {
        let mut grid = open_grid(3, Vec::new());
        let player = grid.add_character(Character::player(Coords::new(1, 1)));
        grid.drain_events();
        let mut controller = TurnController::default();

        controller.handle_input(0, -1, &mut grid).unwrap();
        let events = grid.drain_events();
        assert_eq!(
            events.first(),
            Some(&GridEvent::AnimationsCancelled { character: player })
        );
    }

    #[test]
    fn test_missing_player_is_an_error() {
        let mut grid = open_grid(3, Vec::new());
        let mut controller = TurnController::default();
        assert!(matches!(
            controller.handle_input(1, 0, &mut grid),
            Err(HedgerowError::InvalidState(_))
        ));
        assert!(controller.is_ready());
    }
}
