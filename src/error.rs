//! Error types for scopetint

use thiserror::Error;

/// Result type alias for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting error types
///
/// Per-token problems (misaligned semantic spans, unmatched scopes) never
/// surface here; they degrade to best-effort output instead.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No grammar for language: {0}")]
    UnknownLanguage(String),

    #[error("Semantic analyzer failed: {0}")]
    Analyzer(String),

    #[error("Invalid theme JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Usage: {0}")]
    Usage(String),
}
