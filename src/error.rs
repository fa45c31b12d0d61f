//! Unified error types for dmx
//!
//! Every fatal condition the picker, the navigator and the clients can hit.
//! A user cancelling the picker is not an error; see `Selection::NoSelection`
//! and `Outcome::NoSelection`.

use std::path::PathBuf;

/// Unified error type for dmx operations
#[derive(Debug, thiserror::Error)]
pub enum DmxError {
    /// I/O errors not attributable to a more specific stage
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file missing, unreadable or malformed (non-fatal)
    #[error("Config error: {path} - {reason}")]
    Config { path: PathBuf, reason: String },

    /// The picker executable could not be started
    #[error("Failed to start picker '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The picker ran but exited unsuccessfully
    #[error("Picker '{program}' failed: {status}")]
    PickerFailed { program: String, status: String },

    /// The picker echoed a line that was never presented to it
    #[error("Picker output matches no presented line: {output:?}")]
    UnmatchedOutput { output: String },

    /// A directory or structured document could not be read
    #[error("Enumeration error: {path} - {reason}")]
    Enumeration { path: PathBuf, reason: String },

    /// Writing back to storage failed
    #[error("Storage error: {path} - {reason}")]
    Storage { path: PathBuf, reason: String },

    /// System clipboard access failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// A helper process (editor, formatter, viewer) failed
    #[error("Command '{program}' failed: {reason}")]
    Command { program: String, reason: String },

    /// Caller supplied something the operation cannot act on
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience Result type using DmxError
pub type Result<T> = std::result::Result<T, DmxError>;

impl DmxError {
    /// Create a Config error
    pub fn config(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an Enumeration error
    pub fn enumeration(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Enumeration {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a Storage error
    pub fn storage(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Storage {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a Command error
    pub fn command(program: impl Into<String>, reason: impl ToString) -> Self {
        Self::Command {
            program: program.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the error should abort the current command.
    ///
    /// Only configuration problems are recoverable: defaults stay in effect.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Config { .. })
    }
}
