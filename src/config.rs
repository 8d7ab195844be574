//! Configuration loading
//!
//! Settings come from a `sketchsmell.toml` next to the analyzed project (or
//! an explicit `--config` path); CLI flags override loaded values.

use crate::error::SketchError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "sketchsmell.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Statement budget for the long-method rule.
    pub max_statements: usize,

    /// Path substrings to exclude from discovery.
    pub exclude: Vec<String>,

    /// Rules to run, by code (`PS003`) or name (`long-method`).
    /// Empty means all rules.
    pub rules: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_statements: 50,
            exclude: Vec::new(),
            rules: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, SketchError> {
        let content = fs::read_to_string(path).map_err(|e| SketchError::io(path, e))?;
        toml::from_str(&content).map_err(|e| SketchError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load from the conventional location under `root`, or fall back to
    /// defaults when no config file exists.
    pub fn from_default_locations(root: &Path) -> Result<Self, SketchError> {
        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn rule_enabled(&self, code: &str, name: &str) -> bool {
        self.rules.is_empty()
            || self
                .rules
                .iter()
                .any(|r| r.eq_ignore_ascii_case(code) || r.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_statements, 50);
        assert!(config.rule_enabled("PS001", "decentralized-drawing"));
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            max_statements = 30
            exclude = ["libraries/"]
            rules = ["PS001", "long-method"]
            "#,
        )
        .unwrap();
        assert_eq!(config.max_statements, 30);
        assert_eq!(config.exclude, vec!["libraries/"]);
        assert!(config.rule_enabled("PS001", "decentralized-drawing"));
        assert!(config.rule_enabled("PS003", "long-method"));
        assert!(!config.rule_enabled("PS006", "stateless-class"));
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_default_locations(dir.path()).unwrap();
        assert_eq!(config.max_statements, 50);
    }

    #[test]
    fn test_config_file_discovered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "max_statements = 10\n").unwrap();
        let config = Config::from_default_locations(dir.path()).unwrap();
        assert_eq!(config.max_statements, 10);
    }
}
