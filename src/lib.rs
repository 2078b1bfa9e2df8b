//! Snake Board - grid Snake with a tick-driven engine
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Score display and best-score persistence (score module)
//! - TUI rendering (render module)
//! - Keyboard and pointer input mapping (input module)
//! - The terminal host that schedules ticks, spawns and frames (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod modes;
pub mod render;
pub mod score;

pub use error::GameError;
