//! Error types for the editor core

use thiserror::Error;

/// Main error type for the editor core
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Layer error: {0}")]
    Layer(String),
}
