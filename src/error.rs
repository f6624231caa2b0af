//! Error types for vidseek.

use thiserror::Error;

/// Library-level error type for vidseek operations.
#[derive(Error, Debug)]
pub enum VidseekError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing API key: {0}")]
    Auth(String),

    #[error("Search request failed: {0}")]
    Transport(String),

    #[error("No match: {0}")]
    NoMatch(String),

    #[error("Caption error: {0}")]
    Captions(String),

    #[error("Subtitle parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for vidseek operations.
pub type Result<T> = std::result::Result<T, VidseekError>;
