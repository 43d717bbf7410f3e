//! Environment variable abstraction for testability.
//!
//! Production code uses [`Env::real()`] which delegates to [`std::env::var`].
//! Tests use [`Env::mock()`] backed by a `HashMap`, so config layering can be
//! exercised without touching the process environment.

use std::collections::HashMap;
use std::path::PathBuf;

/// Environment variable reader.
#[derive(Clone, Debug)]
pub struct Env {
    overrides: Option<HashMap<String, String>>,
}

impl Env {
    /// Create an `Env` that reads from the real process environment.
    pub fn real() -> Self {
        Self { overrides: None }
    }

    /// Create an `Env` backed by explicit key-value pairs.
    #[cfg(test)]
    pub fn mock(vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            overrides: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Look up an environment variable by name.
    pub fn var(&self, name: &str) -> Result<String, std::env::VarError> {
        match &self.overrides {
            Some(map) => map.get(name).cloned().ok_or(std::env::VarError::NotPresent),
            None => std::env::var(name),
        }
    }

    /// Look up a variable and treat a non-empty value as a filesystem path.
    pub fn path(&self, name: &str) -> Option<PathBuf> {
        self.var(name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Parse a boolean-ish variable.
    ///
    /// Returns `Some(Err(raw))` when the variable is set to something that is
    /// not a recognised switch value, so callers can warn about it.
    pub fn flag(&self, name: &str) -> Option<Result<bool, String>> {
        let val = self.var(name).ok()?;
        Some(match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(val),
        })
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::real()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_env_reads_cargo_manifest_dir() {
        let env = Env::real();
        assert!(env.var("CARGO_MANIFEST_DIR").is_ok());
    }

    #[test]
    fn mock_env_returns_set_values() {
        let env = Env::mock([("KEEL_FORMAT", "json")]);
        assert_eq!(env.var("KEEL_FORMAT").unwrap(), "json");
        assert!(env.var("KEEL_PROJECT").is_err());
    }

    #[test]
    fn path_ignores_blank_values() {
        let env = Env::mock([("A", "/tmp/keel.toml"), ("B", "  ")]);
        assert_eq!(env.path("A"), Some(PathBuf::from("/tmp/keel.toml")));
        assert_eq!(env.path("B"), None);
        assert_eq!(env.path("C"), None);
    }

    #[test]
    fn flag_accepts_common_spellings() {
        let env = Env::mock([("ON", "Yes"), ("OFF", "0"), ("BAD", "maybe")]);
        assert_eq!(env.flag("ON"), Some(Ok(true)));
        assert_eq!(env.flag("OFF"), Some(Ok(false)));
        assert_eq!(env.flag("BAD"), Some(Err("maybe".to_string())));
        assert_eq!(env.flag("MISSING"), None);
    }
}
