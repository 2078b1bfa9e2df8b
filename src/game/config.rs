use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{GameError, Result};

/// Smallest grid side that still fits the three-cell starting snake
pub const MIN_GRID_SIDE: usize = 3;

/// Largest grid side; keeps cell coordinates inside `i32` and cell counts from overflowing
pub const MAX_GRID_SIDE: usize = 4096;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns in the grid
    pub columns: usize,
    /// Number of rows in the grid
    pub rows: usize,

    // Host cadences
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
    /// Milliseconds between obstacle spawns
    pub spawn_interval_ms: u64,
    /// Milliseconds between frames
    pub render_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 31,
            rows: 31,
            tick_interval_ms: 150,
            spawn_interval_ms: 1000,
            render_interval_ms: 16,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(27, 27)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&json)?;
        Ok(config)
    }

    /// Check that the grid fits the starting snake and that every cadence is non-zero
    pub fn validate(&self) -> Result<()> {
        let side_ok = |side: usize| (MIN_GRID_SIDE..=MAX_GRID_SIDE).contains(&side);
        if !side_ok(self.columns) || !side_ok(self.rows) {
            return Err(GameError::InvalidGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }

        for (name, value) in [
            ("tick", self.tick_interval_ms),
            ("spawn", self.spawn_interval_ms),
            ("render", self.render_interval_ms),
        ] {
            if value == 0 {
                return Err(GameError::InvalidInterval { name });
            }
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }
}
