//! Command-line interface for aurornis.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Program and arguments to run.
    pub command: Vec<String>,
    /// Extra environment variables (`-e KEY=VALUE`).
    pub env: Vec<(String, String)>,
    /// Lines fed to the command's standard input.
    pub stdin_lines: Vec<String>,
    /// Strip color codes from the captured output.
    pub strip_colors: bool,
    /// Normalize `\r\n` to `\n` in the captured output.
    pub normalize_line_endings: bool,
    /// Print the result as JSON.
    pub json: bool,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
///
/// Options stop at the first positional argument: it and everything after
/// it form the command, so the command's own flags are passed through.
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('e') | Long("env") => {
                let value: String = parser.value()?.parse()?;
                let (key, val) = value
                    .split_once('=')
                    .filter(|(key, _)| !key.is_empty())
                    .ok_or_else(|| ArgsError::InvalidValue("env", value.clone()))?;
                result.env.push((key.to_string(), val.to_string()));
            }
            Short('i') | Long("stdin") => {
                result.stdin_lines.push(parser.value()?.parse()?);
            }
            Long("strip-colors") => {
                result.strip_colors = true;
            }
            Long("normalize-line-endings") => {
                result.normalize_line_endings = true;
            }
            Long("json") => {
                result.json = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(program) => {
                result.command.push(into_string(program)?);
                for arg in parser.raw_args()? {
                    result.command.push(into_string(arg)?);
                }
                break;
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

fn into_string(arg: OsString) -> Result<String, ArgsError> {
    arg.into_string()
        .map_err(|arg| ArgsError::NonUnicode(arg.to_string_lossy().into_owned()))
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"aurornis {version}
Run a command and print what happened: exit code, output, duration

USAGE:
    aurornis [OPTIONS] [--] <PROGRAM> [ARGS...]

OPTIONS:
    -e, --env <KEY=VALUE>     Set an environment variable for the command (repeatable)
    -i, --stdin <LINE>        Feed a line on standard input (repeatable)
        --strip-colors        Strip color codes from output (sets NO_COLOR=1)
        --normalize-line-endings
                              Replace \r\n with \n in output
        --json                Print the result as JSON
    -c, --config <FILE>       Path to configuration file (JSON)
    -l, --log-level <LVL>     Log level (error, warn, info, debug, trace)
    -h, --help                Print help
    -V, --version             Print version

ENVIRONMENT VARIABLES:
    AURORNIS_STRIP_COLORS             Strip colors (overrides config)
    AURORNIS_NORMALIZE_LINE_ENDINGS   Normalize line endings (overrides config)
    AURORNIS_LOG_LEVEL                Log level (overrides config)
    RUST_LOG                          Alternative log level setting

The command runs with only PATH from the current environment plus the
variables given with --env or in the configuration file. Exit status is
the command's own, or 127 when it cannot be launched.

EXAMPLES:
    aurornis -- ls -la
    aurornis -e LANG=C --json touch /nonexistent/file
    aurornis -i World -- sh -c 'read name; echo "Hello $name!"'
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("aurornis {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Command argument that is not valid Unicode.
    NonUnicode(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::NonUnicode(arg) => {
                write!(f, "argument is not valid unicode: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
