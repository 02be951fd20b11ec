//! CLI configuration management
//!
//! Handles loading and saving CLI-specific configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sitecmd_core::default_config_path;
use std::path::{Path, PathBuf};

const ENV_REGISTRY: &str = "SITECMD_REGISTRY";
const ENV_VERBOSE: &str = "SITECMD_VERBOSE";
const ENV_COLOR: &str = "SITECMD_COLOR";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// Site registry to load instead of discovering one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_path: Option<PathBuf>,

    /// Enable verbose logging by default
    pub verbose: bool,

    /// Colored output
    pub color: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            registry_path: None,
            verbose: false,
            color: true,
        }
    }
}

impl CliConfig {
    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read CLI config file {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse CLI config file")
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize CLI config")?;

        std::fs::write(path, content).context("Failed to write CLI config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        default_config_path()
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Priority chain (lowest to highest):
/// 1. Defaults
/// 2. Config file
/// 3. Environment variables
/// 4. CLI arguments
///
/// Later layers are applied first and earlier layers only fill what is
/// still unset, so the call order is CLI, env, file.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    registry_path: Option<PathBuf>,
    verbose: Option<bool>,
    color: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the registry path (with validation)
    pub fn with_registry_path(mut self, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        Self::validate_registry_path(&path)?;
        self.registry_path = Some(path);
        Ok(self)
    }

    /// Set verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Set color flag
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = Some(color);
        self
    }

    /// Fill unset values from a config file
    ///
    /// `path` overrides the default location and must exist. A missing
    /// default file is not an error.
    pub fn with_config_file(self, path: Option<&Path>, load_file: bool) -> Result<Self> {
        if !load_file {
            return Ok(self);
        }

        let config = match path {
            Some(path) => CliConfig::load_from(path)?,
            None => CliConfig::load()?,
        };

        let registry_path = match (self.registry_path, config.registry_path) {
            (Some(path), _) => Some(path),
            (None, Some(path)) => {
                Self::validate_registry_path(&path)?;
                Some(path)
            }
            (None, None) => None,
        };

        Ok(Self {
            registry_path,
            verbose: self.verbose.or(Some(config.verbose)),
            color: self.color.or(Some(config.color)),
        })
    }

    /// Fill unset values from environment variables
    ///
    /// Invalid values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if self.registry_path.is_none() {
            if let Ok(path) = std::env::var(ENV_REGISTRY) {
                let path = PathBuf::from(path);
                if Self::validate_registry_path(&path).is_ok() {
                    self.registry_path = Some(path);
                }
            }
        }

        if self.verbose.is_none() {
            if let Ok(verbose) = std::env::var(ENV_VERBOSE) {
                self.verbose = parse_flag(&verbose);
            }
        }

        if self.color.is_none() {
            if let Ok(color) = std::env::var(ENV_COLOR) {
                self.color = parse_flag(&color);
            }
        }

        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<CliConfig> {
        let defaults = CliConfig::default();

        if let Some(path) = &self.registry_path {
            Self::validate_registry_path(path)?;
        }

        Ok(CliConfig {
            registry_path: self.registry_path,
            verbose: self.verbose.unwrap_or(defaults.verbose),
            color: self.color.unwrap_or(defaults.color),
        })
    }

    fn validate_registry_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Registry path cannot be empty"));
        }

        if path.is_dir() {
            return Err(anyhow::anyhow!(
                "Registry path {} is a directory",
                path.display()
            ));
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        std::env::remove_var(ENV_REGISTRY);
        std::env::remove_var(ENV_VERBOSE);
        std::env::remove_var(ENV_COLOR);
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.registry_path.is_none());
        assert!(!config.verbose);
        assert!(config.color);
    }

    #[test]
    fn test_config_serialization() {
        let config = CliConfig {
            registry_path: Some(PathBuf::from("/srv/sites.toml")),
            verbose: true,
            color: false,
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: CliConfig = toml::from_str("verbose = true").unwrap();
        assert!(parsed.verbose);
        assert!(parsed.color);
        assert!(parsed.registry_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cli.toml");

        let config = CliConfig {
            registry_path: Some(PathBuf::from("/srv/sites.toml")),
            verbose: true,
            color: true,
        };
        config.save_to(&path).unwrap();

        assert_eq!(CliConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    // ConfigBuilder tests

    #[test]
    fn test_builder_with_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_builder_registry_validation() {
        let dir = TempDir::new().unwrap();

        assert!(ConfigBuilder::new().with_registry_path("").is_err());
        assert!(ConfigBuilder::new().with_registry_path(dir.path()).is_err());
        assert!(ConfigBuilder::new()
            .with_registry_path(dir.path().join("sites.toml"))
            .is_ok());
    }

    #[test]
    fn test_builder_explicit_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");

        assert!(ConfigBuilder::new()
            .with_config_file(Some(&missing), true)
            .is_err());
        assert!(ConfigBuilder::new()
            .with_config_file(Some(&missing), false)
            .is_ok());
    }

    #[test]
    fn test_builder_file_fills_unset_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cli.toml");
        std::fs::write(
            &path,
            "registry_path = \"/srv/sites.toml\"\nverbose = true\ncolor = false\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_verbose(false)
            .with_config_file(Some(&path), true)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.registry_path, Some(PathBuf::from("/srv/sites.toml")));
        assert!(!config.verbose);
        assert!(!config.color);
    }

    #[test]
    #[serial]
    fn test_builder_with_env_overrides() {
        clear_env();
        std::env::set_var(ENV_REGISTRY, "/env/sites.toml");
        std::env::set_var(ENV_VERBOSE, "true");
        std::env::set_var(ENV_COLOR, "0");

        let config = ConfigBuilder::new().with_env_overrides().build().unwrap();

        assert_eq!(config.registry_path, Some(PathBuf::from("/env/sites.toml")));
        assert!(config.verbose);
        assert!(!config.color);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_builder_priority_chain() {
        clear_env();
        std::env::set_var(ENV_REGISTRY, "/env/sites.toml");
        std::env::set_var(ENV_VERBOSE, "true");

        // CLI args should override env vars
        let config = ConfigBuilder::new()
            .with_registry_path("/cli/sites.toml")
            .unwrap()
            .with_env_overrides()
            .build()
            .unwrap();

        assert_eq!(config.registry_path, Some(PathBuf::from("/cli/sites.toml")));
        assert!(config.verbose);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_builder_invalid_env_values_ignored() {
        clear_env();
        std::env::set_var(ENV_REGISTRY, "");
        std::env::set_var(ENV_VERBOSE, "sometimes");

        let config = ConfigBuilder::new().with_env_overrides().build().unwrap();

        assert!(config.registry_path.is_none());
        assert!(!config.verbose);

        clear_env();
    }
}
