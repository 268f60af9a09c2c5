//! Domain error types

use thiserror::Error;

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("No MythTV connection configuration found (searched: {searched})")]
    NotFound { searched: String },

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },
}

/// Error when parsing a recording start time
#[derive(Debug, Clone, Error)]
#[error("Invalid start time: \"{input}\". Expected UTC timestamp as YYYYmmddHHMMSS (e.g., 20250101083714)")]
pub struct StartTimeParseError {
    pub input: String,
}

/// Error when an unknown comskip output format is configured
#[derive(Debug, Clone, Error)]
#[error("Invalid comskip output format: \"{input}\". Valid formats are: cutlist, edl")]
pub struct InvalidOutputFormatError {
    pub input: String,
}

/// Error when a segment would end before it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid segment: end frame {end} is before start frame {start}")]
pub struct InvalidSegmentError {
    pub start: u64,
    pub end: u64,
}
