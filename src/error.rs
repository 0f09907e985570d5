//! Error types for aurornis.

use thiserror::Error;

use crate::execution::OutputStream;

/// Main error type for command execution.
///
/// A command that runs and exits with a non-zero code is not an error:
/// it produces a regular [`ExecutionResult`](crate::ExecutionResult).
#[derive(Error, Debug)]
pub enum AurornisError {
    /// The program could not be launched (not found, not executable, permission denied).
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Captured output is not valid UTF-8.
    #[error("{stream} is not valid UTF-8: {source}")]
    Decode {
        stream: OutputStream,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// No program was given.
    #[error("empty command: at least the program name is required")]
    EmptyCommand,

    /// I/O error while talking to the child process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for aurornis operations.
pub type Result<T> = std::result::Result<T, AurornisError>;
