//! Error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Spawn or merge requested with a size outside the tier set
    #[error("size {size} is not a configured tier")]
    InvalidTier { size: u32 },

    /// Spawn requested while the game-over latch is set
    #[error("game is over, restart before spawning")]
    GameOver,

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
