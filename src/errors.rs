//! Unified error types and result handling for `HabitBuddy`.

use thiserror::Error;

/// Crate-wide error type covering configuration, storage, and validation
/// failures.
///
/// Read paths in the repositories deliberately do not surface errors (a
/// damaged store degrades to empty collections); everything that remains is
/// a genuine failure the caller should see.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// A collection could not be written back to the store
    #[error("Store error: {message}")]
    Store {
        /// Human-readable description including the affected collection
        message: String,
    },

    /// Habit input failed validation
    #[error("Invalid habit: {message}")]
    InvalidHabit {
        /// Which validation rule was violated
        message: String,
    },

    /// The health metric provider could not deliver data
    #[error("Health data error: {message}")]
    HealthData {
        /// Provider-specific failure description
        message: String,
    },

    /// Underlying filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// Convenience `Result` type
/// Crate-wide result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
