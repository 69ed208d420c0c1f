//! # Input Module
//!
//! Maps key identifiers to player inputs.
//!
//! Keys arrive as strings so any front end can feed them in: DOM-style key
//! codes such as `ArrowLeft` or `KeyA`, or single typed characters.

use crate::Direction;
use log::trace;
use serde::{Deserialize, Serialize};

/// Player input types understood by a [`crate::GameSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Step one cell in a cardinal direction
    Move(Direction),
    /// Quit the game
    Quit,
}

/// Input handler converting key identifiers to [`PlayerInput`]s.
#[derive(Debug, Clone, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use hedgerow::{Direction, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(
    ///     input_handler.key_to_input("ArrowUp"),
    ///     Some(PlayerInput::Move(Direction::North))
    /// );
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Returns the input bound to `key`, or None for unbound keys.
    pub fn key_to_input(&self, key: &str) -> Option<PlayerInput> {
        let input = match key {
            "ArrowLeft" | "KeyA" | "a" | "A" => PlayerInput::Move(Direction::West),
            "ArrowRight" | "KeyD" | "d" | "D" => PlayerInput::Move(Direction::East),
            "ArrowUp" | "KeyW" | "w" | "W" => PlayerInput::Move(Direction::North),
            "ArrowDown" | "KeyS" | "s" | "S" => PlayerInput::Move(Direction::South),
            "Escape" | "KeyQ" | "q" | "Q" => PlayerInput::Quit,
            _ => {
                trace!("Ignoring unbound key {:?}", key);
                return None;
            }
        };
        Some(input)
    }

    /// Reads a string of typed characters as a sequence of inputs, skipping
    /// anything unbound.
    pub fn parse_keys(&self, keys: &str) -> Vec<PlayerInput> {
        let mut buffer = [0u8; 4];
        keys.chars()
            .filter_map(|c| self.key_to_input(c.encode_utf8(&mut buffer)))
            .collect()
    }
}
