//! Error types for turnover.

use thiserror::Error;

/// Errors that can occur while loading the feed or the configuration.
///
/// Parsing and schedule derivation never fail; malformed feed content is
/// dropped or reported through [`crate::ics::RejectedBlock`] instead.
#[derive(Error, Debug)]
pub enum TurnoverError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to fetch calendar: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced when a calendar date cannot be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Date value '{0}' is shorter than 8 characters")]
    TooShort(String),

    #[error("Date value '{0}' is not a real YYYYMMDD calendar date")]
    Invalid(String),

    #[error("Invalid date format '{0}'. Expected YYYY-MM-DD")]
    Format(String),
}

/// Result type alias for turnover operations.
pub type TurnoverResult<T> = Result<T, TurnoverError>;

impl From<reqwest::Error> for TurnoverError {
    fn from(err: reqwest::Error) -> Self {
        TurnoverError::Fetch(err.to_string())
    }
}
