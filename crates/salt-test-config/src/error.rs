//! Configuration loading errors.

use std::fmt;
use thiserror::Error;

/// 1-based location inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Failure to obtain a parsed document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {target}: {reason}")]
    NotFound { target: String, reason: String },

    #[error("invalid URL {target}: {reason}")]
    InvalidUrl { target: String, reason: String },

    #[error("TOML parse error in {target}{}: {message}", .position.as_ref().map(|p| format!(" at {}", p)).unwrap_or_default())]
    Parse {
        target: String,
        position: Option<Position>,
        message: String,
    },

    #[error("checksum mismatch for {target}: expected sha256 {expected}, got {actual}")]
    Integrity {
        target: String,
        expected: String,
        actual: String,
    },
}

/// A document with the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown key '{path}'")]
    UnknownKey { path: String },

    #[error("wrong type at '{path}': expected {expected}, got {got}")]
    WrongType {
        path: String,
        expected: &'static str,
        got: &'static str,
    },
}

impl ValidationError {
    /// Dotted key path of the offending value.
    pub fn path(&self) -> &str {
        match self {
            ValidationError::UnknownKey { path } => path,
            ValidationError::WrongType { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("invalid skiplist: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid run configuration {target}: {message}")]
    Run { target: String, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
