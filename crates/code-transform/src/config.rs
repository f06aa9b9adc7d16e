//! Configuration types for offset finders.

use std::path::{Path, PathBuf};

use language_core::BoundaryRule;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`FinderConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid finder config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for creating offset finders.
///
/// ```json
/// { "boundary": "following", "strictParse": true }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinderConfig {
    /// Tie rule for offsets sitting between two sibling nodes.
    pub boundary: BoundaryRule,
    /// Fail on documents with syntax errors instead of resolving on the
    /// recovered tree.
    pub strict_parse: bool,
}

impl FinderConfig {
    /// Lenient parsing, preceding node wins on boundaries.
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Reject documents with syntax errors.
    pub fn strict() -> Self {
        Self {
            strict_parse: true,
            ..Self::default()
        }
    }

    pub fn with_boundary_rule(mut self, boundary: BoundaryRule) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FinderConfig::default();
        assert_eq!(config.boundary, BoundaryRule::Preceding);
        assert!(!config.strict_parse);
        assert_eq!(config, FinderConfig::lenient());
    }

    #[test]
    fn test_from_json() {
        let config = FinderConfig::from_json(r#"{"boundary": "following", "strictParse": true}"#)
            .unwrap();
        assert_eq!(
            config,
            FinderConfig::strict().with_boundary_rule(BoundaryRule::Following)
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = FinderConfig::from_json("{}").unwrap();
        assert_eq!(config, FinderConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        let result = FinderConfig::from_json(r#"{"boundary": "sideways"}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("finder.json");
        std::fs::write(&path, r#"{"strictParse": true}"#).unwrap();

        assert_eq!(FinderConfig::from_file(&path).unwrap(), FinderConfig::strict());
        assert!(matches!(
            FinderConfig::from_file(&dir.path().join("missing.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
