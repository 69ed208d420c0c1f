//! # Utilities Module
//!
//! Navigation fields and scheduling helpers shared by the game systems.

pub mod navigation;
pub mod schedule;

pub use navigation::*;
pub use schedule::*;
