/*!
 * Error types for the subtitle sanitizer.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while reading or parsing a subtitle document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// The input extension is not one of the supported dialects
    #[error("Unsupported subtitle format: {0} (only .srt and .ass are accepted)")]
    UnsupportedFormat(String),

    /// The document shape could not be recognized
    #[error("Structural parse error: {0}")]
    StructuralParse(String),

    /// A timing field could not be decoded
    #[error("Invalid timestamp '{input}': {reason}")]
    TimestampParse {
        /// Offending timestamp text
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// Reading the input failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl SubtitleError {
    /// Shorthand for a timestamp failure
    pub fn timestamp(input: &str, reason: impl Into<String>) -> Self {
        Self::TimestampParse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while preparing the rule set
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// A delimiter pair could not be turned into a removal pattern
    #[error("Cannot build removal pattern for delimiters '{left}'/'{right}': {reason}")]
    PatternCompile {
        left: String,
        right: String,
        reason: String,
    },
}

/// Errors from loading or saving the rule configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Failed to write config file {path}: {reason}")]
    Write { path: String, reason: String },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from rule preparation
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
