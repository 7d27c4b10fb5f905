//! Configuration loading utilities

use crate::Settings;
use modstats_common::Result as ModStatsResult;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading the configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for modstats_common::ModStatsError {
    fn from(err: ConfigError) -> Self {
        modstats_common::ModStatsError::config(err.to_string())
    }
}

/// Settings loader for the application
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a YAML file with environment variable overrides
    pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut settings: Settings = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut settings)?;

        settings.validate_all().map_err(ConfigError::ValidationError)?;

        Ok(settings)
    }

    /// Load settings from the default locations, falling back to the
    /// built-in SpaceWarp deployment defaults
    pub fn load() -> ModStatsResult<Settings> {
        let settings = if let Ok(config_path) = env::var("MODSTATS_CONFIG_PATH") {
            debug!(path = %config_path, "Loading settings from MODSTATS_CONFIG_PATH");
            Self::load_settings(&config_path)?
        } else if Path::new("modstats.yaml").exists() {
            Self::load_settings("modstats.yaml")?
        } else if Path::new("modstats.yml").exists() {
            Self::load_settings("modstats.yml")?
        } else {
            debug!("No settings file found, using built-in defaults");
            let mut settings = Settings::default();
            Self::apply_env_overrides(&mut settings)?;
            settings
                .validate_all()
                .map_err(ConfigError::ValidationError)?;
            settings
        };

        Ok(settings)
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ModStatsResult<Settings> {
        Ok(Self::load_settings(path)?)
    }

    /// Apply environment variable overrides to settings
    fn apply_env_overrides(settings: &mut Settings) -> Result<(), ConfigError> {
        // GitHub source overrides
        if let Ok(owner) = env::var("GITHUB_OWNER") {
            settings.github.owner = owner;
        }

        if let Ok(repo) = env::var("GITHUB_REPO") {
            settings.github.repo = repo;
        }

        if let Ok(prefix) = env::var("GITHUB_TAG_PREFIX") {
            settings.github.tag_prefix = prefix;
        }

        if let Ok(timeout) = env::var("GITHUB_TIMEOUT") {
            settings.github.timeout_seconds =
                timeout.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "GITHUB_TIMEOUT".to_string(),
                    source: Box::new(e),
                })?;
        }

        // Path overrides
        if let Ok(dir) = env::var("RESOURCES_DIR") {
            settings.paths.resources_dir = dir;
        }

        if let Ok(dir) = env::var("OUTPUT_DIR") {
            settings.paths.output_dir = dir;
        }

        // Graph overrides
        if let Ok(width) = env::var("GRAPH_WIDTH") {
            settings.graph.width = width.parse().map_err(|e| ConfigError::EnvParseError {
                var: "GRAPH_WIDTH".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(height) = env::var("GRAPH_HEIGHT") {
            settings.graph.height = height.parse().map_err(|e| ConfigError::EnvParseError {
                var: "GRAPH_HEIGHT".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(bg_color) = env::var("GRAPH_BACKGROUND_COLOR") {
            settings.graph.background_color = bg_color;
        }

        if let Ok(text_color) = env::var("GRAPH_TEXT_COLOR") {
            settings.graph.text_color = text_color;
        }

        if let Ok(bar_color) = env::var("GRAPH_BAR_COLOR") {
            settings.graph.bar_color = bar_color;
        }

        if let Ok(threshold) = env::var("PIE_THRESHOLD") {
            settings.graph.pie_threshold =
                threshold.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "PIE_THRESHOLD".to_string(),
                    source: Box::new(e),
                })?;
        }

        // Logging overrides
        if let Ok(level) = env::var("LOG_LEVEL") {
            settings.logging.level = level;
        }

        if let Ok(file) = env::var("LOG_FILE") {
            settings.logging.file = Some(file);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Create a temporary YAML settings file for testing
    fn create_test_settings_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    fn full_yaml() -> String {
        let settings = Settings::default();
        serde_yaml::to_string(&settings).expect("defaults serialize")
    }

    #[test]
    fn test_load_valid_yaml_settings() {
        env::remove_var("GITHUB_OWNER");
        env::remove_var("GRAPH_WIDTH");
        env::remove_var("PIE_THRESHOLD");

        let temp_file = create_test_settings_file(&full_yaml());
        let settings =
            SettingsLoader::load_settings(temp_file.path()).expect("Failed to load settings");

        assert_eq!(settings.github.owner, "SpaceWarpDev");
        assert_eq!(settings.github.tag_prefix, "spacewarp-");
        assert_eq!(settings.graph.pie_threshold, 1000);
        assert_eq!(settings.sources.len(), 2);
    }

    #[test]
    fn test_invalid_yaml() {
        let invalid_yaml = "github:\n  owner: \"SpaceWarpDev\"\n  repo: [unclosed array";

        let temp_file = create_test_settings_file(invalid_yaml);
        let result = SettingsLoader::load_settings(temp_file.path());

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_error() {
        env::remove_var("GITHUB_OWNER");
        env::remove_var("GRAPH_WIDTH");

        let mut settings = Settings::default();
        settings.github.owner = String::new();
        let yaml = serde_yaml::to_string(&settings).unwrap();

        let temp_file = create_test_settings_file(&yaml);
        let result = SettingsLoader::load_settings(temp_file.path());

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_environment_variable_overrides() {
        env::set_var("GITHUB_OWNER", "SomeoneElse");
        env::set_var("GRAPH_WIDTH", "1200");
        env::set_var("PIE_THRESHOLD", "500");

        let temp_file = create_test_settings_file(&full_yaml());
        let settings =
            SettingsLoader::load_settings(temp_file.path()).expect("Failed to load settings");

        assert_eq!(settings.github.owner, "SomeoneElse");
        assert_eq!(settings.graph.width, 1200);
        assert_eq!(settings.graph.pie_threshold, 500);

        env::remove_var("GITHUB_OWNER");
        env::remove_var("GRAPH_WIDTH");
        env::remove_var("PIE_THRESHOLD");
    }

    #[test]
    fn test_env_parse_error() {
        env::set_var("GITHUB_TIMEOUT", "not_a_number");

        let temp_file = create_test_settings_file(&full_yaml());
        let result = SettingsLoader::load_settings(temp_file.path());

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::EnvParseError { .. }));

        env::remove_var("GITHUB_TIMEOUT");
    }

    #[test]
    fn test_missing_settings_file() {
        let result = SettingsLoader::load_settings("/nonexistent/path/modstats.yaml");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::IoError(_)));
    }
}
