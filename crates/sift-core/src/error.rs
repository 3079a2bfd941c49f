//! Error types for Sift.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Vector space model used before fit")]
    ModelNotFitted,

    #[error("Vector space model is already fitted for this run")]
    AlreadyFitted,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Summarization error: {0}")]
    Summarization(String),

    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
