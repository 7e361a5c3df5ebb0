//! Parse errors.
//!
//! `Display` output is end-user quality: the application runner prints
//! these messages verbatim when a command line fails to parse. Option
//! names are stored pre-formatted in the active convention's syntax
//! (`--count`, `/count`, ...).

use thiserror::Error;

/// Error produced while parsing or binding a command line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// An option token did not match any declared option.
    #[error("unknown option {option}")]
    UnknownOption {
        /// The option as typed, in convention syntax.
        option: String,
    },

    /// An option requiring a parameter appeared without one.
    #[error("option {option} requires a {expected} value")]
    MissingOptionValue {
        option: String,
        /// Human name of the expected value kind.
        expected: &'static str,
    },

    /// A flag option was given a parameter.
    #[error("option {option} does not take a value")]
    UnexpectedOptionValue { option: String },

    /// An option parameter failed conversion to its declared kind.
    #[error("invalid value '{value}' for option {option}: expected {expected}")]
    InvalidOptionValue {
        option: String,
        value: String,
        expected: &'static str,
    },

    /// A positional argument failed conversion to its declared kind.
    #[error("invalid value '{value}' for <{argument}>: expected {expected}")]
    InvalidArgument {
        argument: String,
        value: String,
        expected: &'static str,
    },

    /// A non-repeatable option appeared more than once.
    #[error("option {option} given more than once")]
    DuplicateOption { option: String },

    /// A required option was absent.
    #[error("missing required option {option}")]
    MissingOption { option: String },

    /// A required positional argument was absent.
    #[error("missing required argument <{argument}>")]
    MissingArgument { argument: String },

    /// More positional arguments than the command declares.
    #[error("unexpected argument '{value}'")]
    UnexpectedArgument { value: String },
}

/// Result alias for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;
