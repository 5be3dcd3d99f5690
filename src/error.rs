use std::fmt;

use crate::config::ConfigError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::new(2, format!("configuration error: {value}"))
    }
}

/// Why a scoring attempt ended in `Failed`.
///
/// Neither kind is retried; the user has to submit again.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// The request could not be completed (network failure, non-success status).
    Transport(String),
    /// A response arrived but failed schema or range checks.
    MalformedResponse(String),
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::Transport(msg) => write!(f, "scoring request failed: {msg}"),
            ScoringError::MalformedResponse(msg) => write!(f, "malformed scoring response: {msg}"),
        }
    }
}

impl std::error::Error for ScoringError {}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        AppError::new(4, value.to_string())
    }
}
