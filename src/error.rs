//! Error types shared across the application.
//!
//! None of these are fatal: the controller and the UI recover from each of
//! them locally and keep the board running.

use std::path::PathBuf;

/// Failures talking to the external UCI engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The executable is missing or could not be launched
    #[error("engine unavailable at {}: {reason}", path.display())]
    Unavailable { path: PathBuf, reason: String },

    /// The engine process went away mid-session
    #[error("engine process terminated")]
    Terminated,

    /// The engine said something we could not make sense of
    #[error("engine protocol error: {0}")]
    Protocol(String),

    /// No answer within the allotted time
    #[error("engine did not answer in time")]
    Timeout,

    /// The engine reported that it has no move to play
    #[error("engine produced no move")]
    NoMove,

    #[error("engine i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures applying moves or loading positions
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A move that is not legal in the current position
    #[error("illegal move: {uci}")]
    IllegalMove { uci: String },

    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

/// Failures reading the settings file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
