//! Execution result types.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

/// Outcome of one command invocation.
///
/// Built once by the executor and never modified; every accessor is a
/// projection of the stored fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    command: Vec<String>,
    exit_code: i32,
    stdout: String,
    stderr: String,
    #[serde(rename = "duration_ns", serialize_with = "serialize_nanos")]
    duration: Duration,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(
        command: Vec<String>,
        exit_code: i32,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            command,
            exit_code,
            stdout,
            stderr,
            duration,
        }
    }

    /// The argv that produced this result.
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// The argv joined with spaces, for display.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// The code returned by the command, usually 0-255 with 0 meaning success.
    ///
    /// On Unix a child killed by a signal reports the negated signal number.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Text written by the command on standard output.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Text written by the command on standard error.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Wall-clock time between spawn and exit.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Execution time in nanoseconds.
    pub fn exec_time_ns(&self) -> u128 {
        self.duration.as_nanos()
    }

    /// Execution time in microseconds, truncated.
    pub fn exec_time_us(&self) -> u128 {
        self.duration.as_micros()
    }

    /// Execution time in milliseconds, truncated.
    pub fn exec_time_ms(&self) -> u128 {
        self.duration.as_millis()
    }

    /// Whether the exit code is zero.
    ///
    /// This says nothing about whether the command did its job: assert on
    /// the output for that.
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<ExecutionResult command=\"{}\" exit_code={} stdout=\"{}\" stderr=\"{}\">",
            self.command_line().escape_debug(),
            self.exit_code,
            self.stdout.escape_debug(),
            self.stderr.escape_debug(),
        )
    }
}

fn serialize_nanos<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX))
}

/// Captured output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::Stderr => f.write_str("stderr"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(exit_code: i32, duration: Duration) -> ExecutionResult {
        ExecutionResult::new(
            vec!["echo".to_string(), "hello".to_string()],
            exit_code,
            "hello\n".to_string(),
            String::new(),
            duration,
        )
    }

    #[test]
    fn test_execution_result_new() {
        let result = result(0, Duration::from_millis(100));

        assert_eq!(result.command(), ["echo", "hello"]);
        assert_eq!(result.command_line(), "echo hello");
        assert_eq!(result.exit_code(), 0);
        assert_eq!(result.stdout(), "hello\n");
        assert_eq!(result.stderr(), "");
        assert_eq!(result.duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_succeeded_follows_exit_code() {
        for code in [-9, -1, 0, 1, 2, 127, 255] {
            assert_eq!(result(code, Duration::ZERO).succeeded(), code == 0);
        }
    }

    #[test]
    fn test_exec_time_units_truncate() {
        let durations = [
            Duration::ZERO,
            Duration::from_nanos(999),
            Duration::from_nanos(1_999_999),
            Duration::new(3, 123_456_789),
        ];
        for duration in durations {
            let result = result(0, duration);
            assert_eq!(result.exec_time_us(), result.exec_time_ns() / 1000);
            assert_eq!(result.exec_time_ms(), result.exec_time_us() / 1000);
        }

        let result = result(0, Duration::new(3, 123_456_789));
        assert_eq!(result.exec_time_ns(), 3_123_456_789);
        assert_eq!(result.exec_time_us(), 3_123_456);
        assert_eq!(result.exec_time_ms(), 3_123);
    }

    #[test]
    fn test_display() {
        let result = result(0, Duration::ZERO);
        assert_eq!(
            result.to_string(),
            r#"<ExecutionResult command="echo hello" exit_code=0 stdout="hello\n" stderr="">"#
        );
    }

    #[test]
    fn test_serialize_json() {
        let json = serde_json::to_value(result(3, Duration::from_micros(1500))).unwrap();

        assert_eq!(json["command"], serde_json::json!(["echo", "hello"]));
        assert_eq!(json["exit_code"], 3);
        assert_eq!(json["stdout"], "hello\n");
        assert_eq!(json["duration_ns"], 1_500_000);
    }

    #[test]
    fn test_output_stream_display() {
        assert_eq!(OutputStream::Stdout.to_string(), "stdout");
        assert_eq!(OutputStream::Stderr.to_string(), "stderr");
    }
}
