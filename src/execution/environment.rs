//! Child-process environment construction.
//!
//! A child never inherits the caller's environment. It starts from a
//! minimal base holding only what executable lookup needs, then receives
//! the caller's overrides.

use std::collections::BTreeMap;

/// Variables copied from the calling process into every child.
#[cfg(windows)]
pub const BASE_VARIABLES: &[&str] = &["PATH", "SYSTEMROOT"];

/// Variables copied from the calling process into every child.
#[cfg(not(windows))]
pub const BASE_VARIABLES: &[&str] = &["PATH"];

/// Variable forced when colors are stripped (<https://no-color.org>).
pub const NO_COLOR_VAR: &str = "NO_COLOR";
const NO_COLOR_VALUE: &str = "1";

/// The minimal environment every child starts from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseEnvironment {
    vars: BTreeMap<String, String>,
}

impl BaseEnvironment {
    /// Read [`BASE_VARIABLES`] from the calling process.
    ///
    /// Variables that are unset (or not valid Unicode) are skipped.
    pub fn capture() -> Self {
        let vars = BASE_VARIABLES
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| (name.to_string(), value))
            })
            .collect();
        Self { vars }
    }

    /// Build a base from explicit variables, without reading the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// A base with no variables at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a base variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Iterate over the base variables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Build the final child environment.
///
/// Starts from `base`, applies `overrides` (which win on conflict), then
/// forces `NO_COLOR=1` when `strip_colors` is set. Pure: same inputs,
/// same map.
pub fn build_environment(
    base: &BaseEnvironment,
    overrides: &BTreeMap<String, String>,
    strip_colors: bool,
) -> BTreeMap<String, String> {
    let mut env = base.vars.clone();

    for (key, value) in overrides {
        env.insert(key.clone(), value.clone());
    }

    if strip_colors {
        env.insert(NO_COLOR_VAR.to_string(), NO_COLOR_VALUE.to_string());
    }

    env
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_base_only() {
        let base = BaseEnvironment::from_vars([("PATH", "/usr/bin:/bin")]);
        let env = build_environment(&base, &BTreeMap::new(), false);

        assert_eq!(env.len(), 1);
        assert_eq!(env.get("PATH"), Some(&"/usr/bin:/bin".to_string()));
    }

    #[test]
    fn test_overrides_win() {
        let base = BaseEnvironment::from_vars([("PATH", "/usr/bin")]);
        let env = build_environment(
            &base,
            &overrides(&[("PATH", "/opt/bin"), ("LANG", "C")]),
            false,
        );

        assert_eq!(env.get("PATH"), Some(&"/opt/bin".to_string()));
        assert_eq!(env.get("LANG"), Some(&"C".to_string()));
    }

    #[test]
    fn test_strip_colors_forces_no_color() {
        let env = build_environment(
            &BaseEnvironment::empty(),
            &overrides(&[("NO_COLOR", "0")]),
            true,
        );
        assert_eq!(env.get(NO_COLOR_VAR), Some(&"1".to_string()));
    }

    #[test]
    fn test_no_color_absent_without_strip() {
        let env = build_environment(&BaseEnvironment::empty(), &BTreeMap::new(), false);
        assert!(env.get(NO_COLOR_VAR).is_none());
    }

    #[test]
    fn test_deterministic() {
        let base = BaseEnvironment::from_vars([("PATH", "/bin")]);
        let extra = overrides(&[("B", "2"), ("A", "1")]);

        let first = build_environment(&base, &extra, true);
        let second = build_environment(&base, &extra, true);

        assert_eq!(first, second);
        let keys: Vec<_> = first.keys().cloned().collect();
        assert_eq!(keys, vec!["A", "B", "NO_COLOR", "PATH"]);
    }

    #[test]
    fn test_capture_only_reads_base_variables() {
        let base = BaseEnvironment::capture();
        for (name, _) in base.iter() {
            assert!(BASE_VARIABLES.contains(&name), "unexpected {name}");
        }
    }
}
