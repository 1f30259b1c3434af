//! Error types for Oppsum.

use thiserror::Error;

/// Library-level error type for Oppsum operations.
#[derive(Error, Debug)]
pub enum OppsumError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Video source error: {0}")]
    VideoSource(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

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
}

/// Result type alias for Oppsum operations.
pub type Result<T> = std::result::Result<T, OppsumError>;
