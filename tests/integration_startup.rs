//! Integration test to ensure a session can start up and play without errors.

use hedgerow::{
    AsciiRenderer, GameConfig, GameSession, HedgerowResult, InputHandler, PlayerInput,
};
use std::io::Write;

#[test]
fn test_basic_startup() -> HedgerowResult<()> {
    let session = GameSession::new(GameConfig::new(12345))?;

    assert_eq!(session.controller().turn_number(), 0);
    assert!(session.controller().is_ready());
    assert!(session.player().is_some());

    let board = AsciiRenderer::new().render(session.grid());
    assert_eq!(board.lines().count(), 11);
    assert_eq!(board.matches('@').count(), 1);
    // Enemies start outside the grid
    assert_eq!(board.matches('E').count(), 0);
    Ok(())
}

#[test]
fn test_scripted_game_from_config_file() -> HedgerowResult<()> {
    let config = GameConfig {
        dimension: 7,
        wall_count: 10,
        enemy_count: 4,
        ..GameConfig::new(99)
    };
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(config.to_json()?.as_bytes())?;

    let loaded = GameConfig::load(file.path())?;
    assert_eq!(loaded, config);

    let mut session = GameSession::new(loaded)?;
    let handler = InputHandler::new();
    for input in handler.parse_keys("wwddssaaq") {
        session.handle_input(input)?;
        session.settle()?;
        if input == PlayerInput::Quit {
            break;
        }
    }

    assert!(session.is_quit_requested());
    assert!(session.controller().is_ready());
    assert_eq!(session.controller().turn_number(), 8);

    let board = AsciiRenderer::new().render(session.grid());
    assert_eq!(board.lines().count(), 15);
    assert_eq!(board.matches('@').count(), 1);
    assert!(board.matches('E').count() <= 4);
    Ok(())
}

#[test]
fn test_same_seed_replays_identically() -> HedgerowResult<()> {
    let play = |seed: u64| -> HedgerowResult<String> {
        let mut session = GameSession::new(GameConfig::new(seed))?;
        for input in InputHandler::new().parse_keys("wasdwasd") {
            session.handle_input(input)?;
            session.settle()?;
        }
        Ok(AsciiRenderer::new().render(session.grid()))
    };

    assert_eq!(play(5)?, play(5)?);
    Ok(())
}
