//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Hosts drive it from their own timers: `advance` on every simulation tick,
//! `place_obstacle` on every spawn tick and `set_direction` whenever input arrives.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, INITIAL_SNAKE_LENGTH, Placement, StepInfo, StepResult};
pub use state::{Cell, CollisionType, GameState, Snake};
