//! TOML-backed application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What startup found when it looked for the config file.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// File read and validated.
    Loaded(AppConfig),
    /// No file yet, treated as a first run.
    Missing,
    /// File present but unreadable, unparsable, or failing validation.
    Invalid(ConfigError),
}

/// Errors raised while reading, writing, or validating the config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Config file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config value: {0}")]
    Validation(String),
}

/// Top-level configuration stored in config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ui: UiConfig,
    pub export: ExportConfig,
}

/// HR server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Window and table preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub start_maximized: bool,
    pub rows_per_page_hint: u32,
}

/// Report export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory offered by the save dialog; empty means the user's home.
    pub default_dir: String,
}

impl AppConfig {
    /// Path of the config file, kept next to the executable.
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Read the file, distinguishing a missing file from a broken one.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Reject values the rest of the app cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("Server URL cannot be empty".to_string()));
        }
        if !self.server.base_url.starts_with("http://") && !self.server.base_url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "Server URL must start with http:// or https://".to_string(),
            ));
        }
        if self.server.timeout_secs < 5 {
            return Err(ConfigError::Validation(
                "Request timeout must be at least 5 seconds".to_string(),
            ));
        }
        if self.server.timeout_secs > 300 {
            return Err(ConfigError::Validation(
                "Request timeout cannot exceed 300 seconds".to_string(),
            ));
        }
        if self.ui.rows_per_page_hint < 1 {
            return Err(ConfigError::Validation(
                "Rows per page must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Write the config back as pretty-printed TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_maximized: false,
            rows_per_page_hint: 15,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_dir: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pass_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_url() {
        let mut config = AppConfig::default();
        config.server.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_non_http_url() {
        let mut config = AppConfig::default();
        config.server.base_url = "ftp://hr.example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let mut config = AppConfig::default();

        config.server.timeout_secs = 4;
        assert!(config.validate().is_err());

        config.server.timeout_secs = 301;
        assert!(config.validate().is_err());

        config.server.timeout_secs = 30;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rows_per_page() {
        let mut config = AppConfig::default();
        config.ui.rows_per_page_hint = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.server.base_url, config.server.base_url);
        assert_eq!(back.server.timeout_secs, config.server.timeout_secs);
    }
}
