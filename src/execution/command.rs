//! Execution options.

use std::collections::BTreeMap;

use super::environment::{build_environment, BaseEnvironment};

/// How a command is run and how its output is post-processed.
///
/// Built once per call with the consuming setters below; the engine only
/// ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Variables set on top of the base environment (they win on conflict).
    pub env: BTreeMap<String, String>,
    /// Remove SGR color sequences from captured output and set `NO_COLOR=1`.
    pub strip_colors: bool,
    /// Lines fed to standard input, joined with `\n`.
    pub stdin_lines: Option<Vec<String>>,
    /// Replace `\r\n` with `\n` in captured output. Off by default.
    pub normalize_line_endings: bool,
    /// Base environment; captured from the calling process when `None`.
    pub base: Option<BaseEnvironment>,
}

impl ExecutionOptions {
    /// Options with every flag off and no extra environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Add multiple environment variables.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in vars {
            self.env.insert(k.into(), v.into());
        }
        self
    }

    /// Set whether to strip color codes.
    pub fn strip_colors(mut self, strip: bool) -> Self {
        self.strip_colors = strip;
        self
    }

    /// Set the lines written to the child's standard input.
    pub fn stdin_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stdin_lines = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Set whether to normalize `\r\n` to `\n`.
    pub fn normalize_line_endings(mut self, normalize: bool) -> Self {
        self.normalize_line_endings = normalize;
        self
    }

    /// Use an explicit base environment instead of capturing the caller's.
    pub fn base_environment(mut self, base: BaseEnvironment) -> Self {
        self.base = Some(base);
        self
    }

    /// Bytes to write on standard input, or `None` when stdin should be
    /// closed right away.
    pub fn stdin_payload(&self) -> Option<Vec<u8>> {
        self.stdin_lines
            .as_ref()
            .map(|lines| lines.join("\n").into_bytes())
            .filter(|payload| !payload.is_empty())
    }

    /// The complete environment the child will see.
    pub fn environment(&self) -> BTreeMap<String, String> {
        match &self.base {
            Some(base) => build_environment(base, &self.env, self.strip_colors),
            None => build_environment(&BaseEnvironment::capture(), &self.env, self.strip_colors),
        }
    }
}
