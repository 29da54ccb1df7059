//! Error types for the rep_core library.
//!
//! Only setup-time failures live here. Per-frame problems (missing or
//! low-confidence landmarks) are reported as [`crate::Rejected`] values.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for rep_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Exercise profile misconfiguration
    #[error("Profile error: {0}")]
    Profile(String),

    /// Lookup of an exercise id that is not registered
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
