//! Error types for the fallible logging API

use std::path::PathBuf;

use thiserror::Error;

/// Failure reported by the `try_*` operations of [`LogWriter`](super::LogWriter)
///
/// The non-throwing operations report the same failures as diagnostics
/// instead of returning them.
#[derive(Error, Debug)]
pub enum LogError {
    /// Neither the requested nor the fallback directory could be created and written
    #[error("Failed to create log directory {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The daily log file could not be opened for appending
    #[error("Failed to open log file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Appending or flushing a line failed
    #[error("Failed to write log file {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log directory could not be listed for pruning
    #[error("Failed to list log directory {}: {source}", .path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A level name outside DEBUG, INFO, WARN, ERROR
    #[error("Invalid log level: {0:?}")]
    InvalidLevel(String),
}
