//! Error types for core colour and markup operations.

use thiserror::Error;

/// Error type for colour parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Input string was empty.
    #[error("empty colour")]
    EmptyInput,

    /// Unknown colour name.
    #[error("unknown colour name: {0}")]
    UnknownColor(String),

    /// Malformed hex colour (expected 6 hex digits).
    #[error("invalid hex colour: #{0}")]
    InvalidHex(String),
}
