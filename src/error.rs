//! Crate error type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid board dimensions {rows}x{cols} (need at least 2x2)")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("bad board text on line {line}: {reason}")]
    ParseBoard { line: usize, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
