/*!
 * Error types for the shortscript application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised around the script parser.
///
/// The parser itself never fails; these are the document-level checks
/// the orchestrator performs before and after calling it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The caller asked for a script without a topic
    #[error("Topic is required")]
    MissingTopic,

    /// The text generator returned no usable text
    #[error("No response generated from the text generator")]
    EmptyUpstreamResponse,

    /// Parsing produced a document without sections
    #[error("Failed to parse script sections")]
    EmptyDocument,
}

/// Errors that can occur when talking to an external collaborator
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request could not be sent or completed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The external program exited unsuccessfully
    #[error("Command '{program}' failed with status {status}: {stderr}")]
    CommandFailed {
        /// Program that was run
        program: String,
        /// Exit status description
        status: String,
        /// Captured standard error
        stderr: String,
    },

    /// The external program did not finish in time
    #[error("Command '{program}' timed out after {secs} seconds")]
    Timeout {
        /// Program that was run
        program: String,
        /// Timeout that elapsed
        secs: u64,
    },

    /// Local I/O around the collaborator failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// A requested artifact does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error from a collaborator
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from script generation or parsing
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// HTTP-style status code for reporting this error at a request boundary
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Script(ScriptError::MissingTopic) => 400,
            Self::NotFound(_) => 404,
            _ => 500,
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
