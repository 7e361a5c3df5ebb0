//! Errors surfaced by command handlers.

use thiserror::Error;

/// Failure reported by a command handler: a message for the user and the
/// process exit code the runner should return.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct CommandError {
    message: String,
    exit_code: i32,
}

impl CommandError {
    /// A failure with exit code 1.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: 1,
        }
    }

    /// A failure with an explicit exit code.
    pub fn with_code(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// The user-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The exit code the runner returns.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for CommandError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for CommandError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
