//! Error types for the liftplan_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for liftplan_core operations
///
/// The methodology engine itself never surfaces these; they come from the
/// configuration and document layers and from pluggable scorers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Methodology scorer failed or is unavailable
    #[error("Scorer error: {0}")]
    Scorer(String),

    /// Workout or profile document error
    #[error("Document error: {0}")]
    Document(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
