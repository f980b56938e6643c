//! Error types for the wrikka crate

use thiserror::Error;

/// Result type for wrikka operations
pub type Result<T> = std::result::Result<T, WrikkaError>;

/// Errors surfaced by the descriptor manifest loader and the content engine.
///
/// The content resolver never propagates these past its boundary; every
/// failure is converted into a not-found-shaped
/// [`ContentOutcome`](crate::content::ContentOutcome) carrying the
/// diagnostic message.
#[derive(Error, Debug)]
pub enum WrikkaError {
    #[error("Invalid request parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    #[error("Invalid descriptor manifest {path}: {reason}")]
    InvalidManifest { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),
}
