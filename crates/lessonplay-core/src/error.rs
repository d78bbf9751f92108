//! Core error types for lessonplay-core.
//!
//! The state machine itself has no fatal error class -- out-of-contract
//! inputs degrade to no-ops. These types cover the fallible edges:
//! loading question banks, configuration I/O, and bank validation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lessonplay-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Question bank loading errors
    #[error("Question bank error: {0}")]
    Bank(#[from] BankError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home/config directory could not be resolved
    #[error("Failed to resolve config directory: {0}")]
    DirUnavailable(String),
}

/// Question-bank loading errors.
#[derive(Error, Debug)]
pub enum BankError {
    /// Failed to read a bank file
    #[error("Failed to read question bank {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse bank contents
    #[error("Failed to parse question bank: {0}")]
    ParseFailed(String),
}

/// Validation errors reported by `QuestionBank::validate`.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A checkpoint has fewer than two options
    #[error("Checkpoint '{checkpoint}' has {count} options (minimum is 2)")]
    TooFewOptions { checkpoint: String, count: usize },

    /// A checkpoint has no option flagged correct
    #[error("Checkpoint '{checkpoint}' has no correct option")]
    NoCorrectOption { checkpoint: String },

    /// A checkpoint has more than one option flagged correct
    #[error("Checkpoint '{checkpoint}' has {count} correct options (expected exactly 1)")]
    MultipleCorrectOptions { checkpoint: String, count: usize },

    /// Two checkpoints share an id
    #[error("Duplicate checkpoint id '{id}'")]
    DuplicateId { id: String },

    /// An option id repeats within a checkpoint
    #[error("Checkpoint '{checkpoint}' repeats option id '{option}'")]
    DuplicateOptionId { checkpoint: String, option: String },

    /// A trigger time is negative
    #[error("Checkpoint '{checkpoint}' has negative trigger time {time}")]
    NegativeTriggerTime { checkpoint: String, time: f64 },

    /// Two checkpoints resolve to the same trigger second
    #[error("Checkpoints '{first}' and '{second}' both trigger at second {trigger_second}")]
    DuplicateTriggerSecond {
        first: String,
        second: String,
        trigger_second: u64,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
