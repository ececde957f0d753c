//! Error types
//!
//! Gameplay failures (going off-path, missing a turn) are not errors; they are
//! an attempt outcome. Only configuration and screen-flow mistakes end up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("level {level} is out of range (1..={max})")]
    LevelOutOfRange { level: u32, max: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
