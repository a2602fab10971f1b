//! Error types and handling infrastructure for framefeed.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary layers `anyhow` on top for context at the edge.
//!
//! ## Design Principles
//!
//! - **Local errors**: Nothing in here is fatal to the dispatch loop; callers log and move on
//! - **Context preservation**: Include the frame number or operation for debugging
//! - **Consistency**: Standardized Result type across all modules

use thiserror::Error;

/// The main error type for framefeed operations.
#[derive(Error, Debug)]
pub enum FramefeedError {
    /// Terminal or file I/O failed (raw mode, polling, drawing, config files)
    #[error("I/O operation failed: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine rejected or failed to process a frame batch
    #[error("Frame {frame} delivery failed: {message}")]
    Delivery { frame: u64, message: String },

    /// The engine's startup routine failed
    #[error("Engine startup failed: {message}")]
    EngineStartup { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for framefeed operations.
pub type Result<T> = std::result::Result<T, FramefeedError>;

impl FramefeedError {
    /// Create an Io error from an io::Error with additional context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a Delivery error for the given frame
    pub fn delivery(frame: u64, message: impl Into<String>) -> Self {
        Self::Delivery {
            frame,
            message: message.into(),
        }
    }

    /// Create an EngineStartup error with a descriptive message
    pub fn engine_startup(message: impl Into<String>) -> Self {
        Self::EngineStartup {
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
}

// Automatic conversion from io::Error to FramefeedError
impl From<std::io::Error> for FramefeedError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::Interrupted => Self::Io {
                message: "Interrupted".to_string(),
                source: err,
            },
            std::io::ErrorKind::Unsupported => Self::Io {
                message: "Terminal feature not supported".to_string(),
                source: err,
            },
            _ => Self::Io {
                message: "Unexpected I/O failure".to_string(),
                source: err,
            },
        }
    }
}
