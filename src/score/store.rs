//! Best-score persistence
//!
//! A single value survives between sessions. The file store keeps it in a
//! small JSON object under [`BEST_SCORE_KEY`], so the file can be read by
//! anything that understands a key/value record.

use crate::error::Result;
use serde_json::{Map, Value};
use std::cell::Cell;
use std::path::{Path, PathBuf};

/// Fixed identifier the best score is stored under
pub const BEST_SCORE_KEY: &str = "bestScore";

/// Loads and saves the best score
pub trait BestScoreStore {
    fn load(&self) -> Result<u32>;

    fn save(&self, best_score: u32) -> Result<()>;
}

/// Stores the best score in a JSON file
#[derive(Debug, Clone)]
pub struct FileBestScoreStore {
    path: PathBuf,
}

impl FileBestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_record(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let json = std::fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&json)?;
        match value {
            Value::Object(record) => Ok(record),
            _ => Ok(Map::new()),
        }
    }
}

impl BestScoreStore for FileBestScoreStore {
    /// A missing file or key counts as a best score of zero
    fn load(&self) -> Result<u32> {
        let record = self.read_record()?;
        let best = record
            .get(BEST_SCORE_KEY)
            .and_then(Value::as_u64)
            .map(|v| v.min(u32::MAX as u64) as u32)
            .unwrap_or(0);
        Ok(best)
    }

    /// Keeps any other keys already present in the file
    fn save(&self, best_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // An unreadable file is replaced rather than blocking the save
        let mut record = self.read_record().unwrap_or_default();
        record.insert(BEST_SCORE_KEY.to_string(), Value::from(best_score));

        let json = serde_json::to_string_pretty(&Value::Object(record))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Keeps the best score for the current process only
#[derive(Debug, Default)]
pub struct MemoryBestScoreStore {
    best_score: Cell<u32>,
}

impl MemoryBestScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BestScoreStore for MemoryBestScoreStore {
    fn load(&self) -> Result<u32> {
        Ok(self.best_score.get())
    }

    fn save(&self, best_score: u32) -> Result<()> {
        self.best_score.set(best_score);
        Ok(())
    }
}
