//! Error types for the neocargo core

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A lifecycle precondition was violated. The message names the
    /// precondition and, where relevant, the missing resource.
    #[error("{0}")]
    Validation(String),

    /// A free-text city label could not be resolved to a known city.
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Both cities resolved but no route connects them.
    #[error("No route between {origin} and {destination}")]
    NoRoute { origin: String, destination: String },

    #[error("Record not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Shorthand for a validation error with a formatted reason
    pub fn validation(reason: impl Into<String>) -> Self {
        Error::Validation(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
