//! Configuration management for aurornis.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::execution::ExecutionOptions;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default execution options.
    pub execution: ExecutionSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Execution defaults section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionSection {
    /// Strip color codes from captured output.
    pub strip_colors: bool,
    /// Replace `\r\n` with `\n` in captured output.
    pub normalize_line_endings: bool,
    /// Extra environment variables for every command.
    pub environment: BTreeMap<String, String>,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Apply environment variable overrides read through `lookup`.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("AURORNIS_STRIP_COLORS") {
            self.execution.strip_colors = parse_flag("AURORNIS_STRIP_COLORS", &value)?;
        }

        if let Some(value) = lookup("AURORNIS_NORMALIZE_LINE_ENDINGS") {
            self.execution.normalize_line_endings =
                parse_flag("AURORNIS_NORMALIZE_LINE_ENDINGS", &value)?;
        }

        if let Some(level) = lookup("AURORNIS_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if args.strip_colors {
            self.execution.strip_colors = true;
        }

        if args.normalize_line_endings {
            self.execution.normalize_line_endings = true;
        }

        for (key, value) in &args.env {
            self.execution
                .environment
                .insert(key.clone(), value.clone());
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match args.config {
            Some(ref path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env()?;
        config.apply_args(args);

        Ok(config)
    }

    /// Execution options carrying the configured defaults.
    pub fn to_options(&self) -> ExecutionOptions {
        ExecutionOptions::new()
            .envs(self.execution.environment.clone())
            .strip_colors(self.execution.strip_colors)
            .normalize_line_endings(self.execution.normalize_line_endings)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(name, value.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// Environment variable holding something other than a boolean.
    InvalidFlag(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::InvalidFlag(name, value) => {
                write!(f, "invalid boolean for {}: '{}'", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
