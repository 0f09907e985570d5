//! Output post-processing.
//!
//! This module provides the text transformations applied to captured
//! output before it lands in an [`ExecutionResult`](crate::ExecutionResult):
//! - SGR color-code stripping (a narrow, enumerated set)
//! - Windows-to-Unix line-ending normalization
//!
//! # Example
//!
//! ```
//! use aurornis::output::OutputSanitizer;
//!
//! let raw = "\x1b[0;31mRed text\x1b[0m\r\n";
//! let clean = OutputSanitizer::strip_colors(raw);
//! assert_eq!(clean, "Red text\r\n");
//! assert_eq!(OutputSanitizer::normalize_line_endings(&clean), "Red text\n");
//! ```

mod sanitizer;

pub use sanitizer::OutputSanitizer;
