//! Configuration management for the validator
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (TPI_*)
//! 3. Config file (~/.config/tpi/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Labels and comment text used by the test plan item validator
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Label marking an issue as a test plan item
    pub label: String,

    /// Label applied while the item fails validation
    pub invalid_label: String,

    /// Text posted above the parse error on invalid items
    pub comment: String,

    /// Label added to issues listed on the `Refs:` line; `None` disables it
    pub refs_label: Option<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            label: "testplan-item".to_string(),
            invalid_label: "invalid-testplan-item".to_string(),
            comment: "This test plan item could not be validated. \
                      Please fix the issue description using the error below."
                .to_string(),
            refs_label: Some("on-testplan".to_string()),
        }
    }
}

/// Per-field overrides coming from CLI flags
#[derive(Debug, Clone, Default)]
pub struct ValidatorOverrides {
    pub label: Option<String>,
    pub invalid_label: Option<String>,
    pub comment: Option<String>,
    pub refs_label: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Validator configuration
    pub validator: ValidatorConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/tpi/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tpi").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - TPI_LABEL
    /// - TPI_INVALID_LABEL
    /// - TPI_COMMENT
    /// - TPI_REFS_LABEL (empty disables labeling referenced issues)
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(ValidatorOverrides {
            label: std::env::var("TPI_LABEL").ok(),
            invalid_label: std::env::var("TPI_INVALID_LABEL").ok(),
            comment: std::env::var("TPI_COMMENT").ok(),
            refs_label: std::env::var("TPI_REFS_LABEL").ok(),
        })
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(self, overrides: ValidatorOverrides) -> Self {
        self.with_overrides(overrides)
    }

    fn with_overrides(mut self, overrides: ValidatorOverrides) -> Self {
        if let Some(label) = overrides.label {
            self.validator.label = label;
        }

        if let Some(label) = overrides.invalid_label {
            self.validator.invalid_label = label;
        }

        if let Some(comment) = overrides.comment {
            self.validator.comment = comment;
        }

        if let Some(label) = overrides.refs_label {
            self.validator.refs_label = (!label.trim().is_empty()).then_some(label);
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(overrides: ValidatorOverrides) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.validator.label, "testplan-item");
        assert_eq!(config.validator.invalid_label, "invalid-testplan-item");
        assert_eq!(config.validator.refs_label.as_deref(), Some("on-testplan"));
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_cli_overrides(ValidatorOverrides {
            label: Some("tpi".to_string()),
            comment: Some("plz fix".to_string()),
            ..Default::default()
        });

        assert_eq!(config.validator.label, "tpi");
        assert_eq!(config.validator.comment, "plz fix");
        assert_eq!(config.validator.invalid_label, "invalid-testplan-item");
    }

    #[test]
    fn test_empty_refs_label_disables() {
        let config = Config::default().with_cli_overrides(ValidatorOverrides {
            refs_label: Some(String::new()),
            ..Default::default()
        });
        assert!(config.validator.refs_label.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[validator]
label = "tpi"
invalid_label = "invalid-tpi"
comment = "plz fix"
refs_label = "tracked"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.validator.label, "tpi");
        assert_eq!(config.validator.invalid_label, "invalid-tpi");
        assert_eq!(config.validator.comment, "plz fix");
        assert_eq!(config.validator.refs_label.as_deref(), Some("tracked"));
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[validator]
label = "tpi"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        // everything else falls back to defaults
        assert_eq!(config.validator.label, "tpi");
        assert_eq!(config.validator.invalid_label, "invalid-testplan-item");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[validator]\ninvalid_label = \"broken-tpi\"").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.validator.invalid_label, "broken-tpi");
    }

    #[test]
    fn test_load_from_file_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[validator\nlabel = ").unwrap();

        let err = Config::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
