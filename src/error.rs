use thiserror::Error;

/// Errors surfaced by the library outside of normal gameplay
#[derive(Error, Debug)]
pub enum GameError {
    #[error("grid of {columns}x{rows} is out of range, each side must be between 3 and 4096")]
    InvalidGrid { columns: usize, rows: usize },
    #[error("{name} interval must be greater than zero")]
    InvalidInterval { name: &'static str },
    #[error("unknown direction index {0}")]
    UnknownDirection(u8),
    #[error("I/O error")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("JSON error")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
