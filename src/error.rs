//! Error types and handling infrastructure for wavetui.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! The waveform engine itself never fails: unknown signal names are absorbed as
//! no-ops. Errors originate at the edges (trace loading, directory listing,
//! terminal I/O, configuration) and surface on the status line.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for wavetui operations.
#[derive(Error, Debug)]
pub enum WaveError {
    /// File system related errors (permission denied, read failure, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// The trace file could not be parsed
    #[error("Malformed trace {path}: {message}")]
    TraceParse { path: PathBuf, message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration file or value errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for wavetui operations.
pub type Result<T> = std::result::Result<T, WaveError>;

impl WaveError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a TraceParse error for the given trace file
    pub fn trace_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::TraceParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error to WaveError
impl From<std::io::Error> for WaveError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => {
                // Path context is lost here; call sites that know the path
                // build FileNotFound directly.
                Self::FileError {
                    message: "File not found".to_string(),
                    source: err,
                }
            }
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}
