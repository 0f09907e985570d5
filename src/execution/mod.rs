//! Command execution engine.
//!
//! This module runs one command at a time and captures its outcome:
//! - Controlled environment (minimal base plus explicit overrides)
//! - Standard input injection
//! - Concurrent capture of stdout and stderr
//! - Timing, color stripping and line-ending normalization
//!
//! # Example
//!
//! ```no_run
//! use aurornis::execution::{execute, ExecutionOptions};
//!
//! let options = ExecutionOptions::new()
//!     .env("LANG", "C")
//!     .strip_colors(true)
//!     .stdin_lines(["World"]);
//!
//! let result = execute(["python3", "greet.py"], &options).unwrap();
//! assert!(result.succeeded());
//! println!("{} took {}ms", result.command_line(), result.exec_time_ms());
//! ```

mod command;
mod environment;
mod executor;
mod result;

pub use command::ExecutionOptions;
pub use environment::{build_environment, BaseEnvironment, BASE_VARIABLES, NO_COLOR_VAR};
pub use executor::{execute, execute_async, execute_simple};
pub use result::{ExecutionResult, OutputStream};
