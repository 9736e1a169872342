//! Error types for sarathi-steer.

use thiserror::Error;

/// Steering library error type.
#[derive(Error, Debug)]
pub enum SteerError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for SteerError {
    fn from(e: toml::de::Error) -> Self {
        SteerError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SteerError>;
