//! Turn controller behaviour driven through a full game session.

use hedgerow::{
    Coords, Direction, GameConfig, GameSession, GridEvent, HedgerowResult, PlayerInput, TurnState,
};

fn quiet_config(seed: u64) -> GameConfig {
    GameConfig {
        wall_count: 0,
        enemy_count: 0,
        ..GameConfig::new(seed)
    }
}

fn player_coords(session: &GameSession) -> Coords {
    session.player().map(|p| p.coords).unwrap()
}

#[test]
fn test_second_queued_input_wins() -> HedgerowResult<()> {
    let mut session = GameSession::new(quiet_config(1))?;
    assert_eq!(player_coords(&session), Coords::new(2, 2));

    session.handle_input(PlayerInput::Move(Direction::North))?;
    assert_eq!(session.controller().state(), TurnState::Locked);
    assert!(session
        .handle_input(PlayerInput::Move(Direction::West))?
        .is_none());
    assert!(session
        .handle_input(PlayerInput::Move(Direction::South))?
        .is_none());

    session.settle()?;

    // North then South: back where we started, West never happened
    assert_eq!(player_coords(&session), Coords::new(2, 2));
    assert_eq!(session.controller().turn_number(), 2);
    Ok(())
}

#[test]
fn test_frame_stepping_unlocks_after_delays() -> HedgerowResult<()> {
    let mut session = GameSession::new(quiet_config(2))?;
    session.handle_input(PlayerInput::Move(Direction::East))?;

    let mut frames = 0;
    while !session.controller().is_ready() {
        session.advance(1.0 / 60.0)?;
        frames += 1;
        assert!(frames < 60, "controller never unlocked");
    }
    // One step delay plus an empty enemy turn
    assert!(frames >= 3);
    assert!(session.controller().is_idle());
    assert_eq!(player_coords(&session), Coords::new(3, 2));
    Ok(())
}

#[test]
fn test_walking_into_boundary_skips_enemy_turn() -> HedgerowResult<()> {
    let config = GameConfig {
        wall_count: 0,
        enemy_count: 4,
        player_start: Some(Coords::new(0, 0)),
        ..GameConfig::new(3)
    };
    let mut session = GameSession::new(config)?;
    let before: Vec<Coords> = session.grid().characters().iter().map(|c| c.coords).collect();

    for _ in 0..3 {
        let outcome = session
            .handle_input(PlayerInput::Move(Direction::West))?
            .unwrap();
        assert!(!outcome.did_move);
        session.settle()?;
    }

    let after: Vec<Coords> = session.grid().characters().iter().map(|c| c.coords).collect();
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn test_enemies_arrive_and_attack() -> HedgerowResult<()> {
    let config = GameConfig {
        enemy_count: 2,
        ..quiet_config(4)
    };
    let mut session = GameSession::new(config)?;
    session.drain_events();

    // Shuffle back and forth so the enemies get plenty of turns.
    let mut attacked = false;
    for turn in 0..40 {
        let direction = if turn % 2 == 0 {
            Direction::North
        } else {
            Direction::South
        };
        session.handle_input(PlayerInput::Move(direction))?;
        session.settle()?;

        let events = session.drain_events();
        attacked |= events
            .iter()
            .any(|e| matches!(e, GridEvent::Attacked { .. }));
        if attacked {
            break;
        }
    }

    assert!(attacked);
    let entered = session
        .grid()
        .characters()
        .iter()
        .filter(|c| c.entered)
        .count();
    assert!(entered >= 1);
    Ok(())
}
