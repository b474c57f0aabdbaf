//! Application-level errors.

use thiserror::Error;

use zerotrust_core::error::ConfigError;
use zerotrust_sim::engine::SetupError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no bot with id `{0}`")]
    UnknownBot(String),

    #[error("the bot store is empty")]
    NoBots,

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Tuning(#[from] ConfigError),

    #[error("result sink failed: {0}")]
    Sink(String),

    #[error("round loop already finished")]
    LoopFinished,

    #[error("round loop thread panicked")]
    LoopPanicked,
}
