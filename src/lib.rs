//! # aurornis
//!
//! Command line program test helper.
//!
//! Run an external command from a test and get back a deterministic,
//! assertion-friendly description of what happened: exit code, standard
//! output, standard error and duration.
//!
//! ## Features
//!
//! - **Isolated environment**: children only see `PATH` (and `SYSTEMROOT`
//!   on Windows) plus the variables you pass
//! - **Standard input**: feed lines to the command
//! - **Color stripping**: remove SGR color codes and set `NO_COLOR=1`
//! - **Line endings**: optionally normalize `\r\n` to `\n`
//! - **Sync and async**: blocking [`execute`] or tokio-based [`execute_async`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use aurornis::{execute, ExecutionOptions};
//!
//! fn main() -> aurornis::Result<()> {
//!     let result = execute(
//!         ["touch", "/tmp/aurornis/path/in/an/inexistent/folder.txt"],
//!         &ExecutionOptions::new().env("LANG", "C"),
//!     )?;
//!
//!     assert!(!result.succeeded());
//!     assert_eq!(result.stdout(), "");
//!     assert!(result.stderr().contains("No such file or directory"));
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod logging;
pub mod output;

// Re-export commonly used types
pub use error::{AurornisError, Result};
pub use execution::{
    execute, execute_async, execute_simple, BaseEnvironment, ExecutionOptions, ExecutionResult,
    OutputStream,
};
pub use output::OutputSanitizer;
