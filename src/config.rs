//! Build configuration
//!
//! Looked up in `--config <file>` if given, otherwise in
//! `~/.config/wordgraph/config.json` when that file exists. Command line
//! flags override whatever was loaded.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where a build writes its outputs and how it treats bad input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Destination of the encoded artifact
    pub output: PathBuf,
    /// Optional DOT rendering of the minimized graph
    pub tree_dot: Option<PathBuf>,
    /// Optional DOT rendering of the flat array
    pub array_dot: Option<PathBuf>,
    /// Skip malformed vocabulary lines instead of failing the build
    pub skip_malformed: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            output: PathBuf::from("dawg.wg"),
            tree_dot: None,
            array_dot: None,
            skip_malformed: true,
        }
    }
}

impl BuildConfig {
    /// Default config file location (~/.config/wordgraph/config.json)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wordgraph").join("config.json"))
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Load `explicit` if given, else the default file if present, else defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"tree_dot": "tree.dot"}"#).unwrap();

        let config = BuildConfig::load(&path).unwrap();
        assert_eq!(config.output, PathBuf::from("dawg.wg"));
        assert_eq!(config.tree_dot, Some(PathBuf::from("tree.dot")));
        assert!(config.skip_malformed);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let err = BuildConfig::resolve(Some(dir.path().join("nope.json").as_path())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(BuildConfig::load(&path), Err(Error::Config(_))));
    }
}
