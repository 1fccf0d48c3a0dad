//! Front end configuration loaded from `connections.toml`.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "connections.toml";

/// Environment variable overriding [`AppConfig::base_url`].
pub const BASE_URL_ENV: &str = "CONNECTIONS_BASE_URL";

/// Settings for the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct AppConfig {
    /// Page that share links point at.
    base_url: String,

    /// Whether to show the "One away..." hint.
    #[getter(skip)]
    hints: bool,

    /// Whether the end-of-game summary carries a link back to the puzzle.
    #[getter(skip)]
    share_link: bool,

    /// File that receives logs while the board is on screen.
    log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_string(),
            hints: true,
            share_link: true,
            log_file: "connections.log".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(base_url = %config.base_url, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, falling back to defaults, then applies
    /// environment overrides.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = if path.as_ref().exists() {
            Self::from_file(path)?
        } else {
            info!("No config file, using defaults");
            Self::default()
        };
        Ok(config.with_base_url_override(std::env::var(BASE_URL_ENV).ok()))
    }

    /// Replaces the base URL when an override is present and non-empty.
    pub fn with_base_url_override(self, base_url: Option<String>) -> Self {
        match base_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                debug!(%url, "Base URL overridden");
                self.with_base_url(url)
            }
            None => self,
        }
    }

    /// Whether the "One away..." hint is shown.
    pub fn hints_enabled(&self) -> bool {
        self.hints
    }

    /// Whether summaries end with a link.
    pub fn share_link_enabled(&self) -> bool {
        self.share_link
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.base_url(), "http://localhost:3000/");
        assert!(config.hints_enabled());
        assert!(config.share_link_enabled());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str("hints = false").unwrap();
        assert!(!config.hints_enabled());
        assert_eq!(config.base_url(), "http://localhost:3000/");
    }

    #[test]
    fn test_override_ignores_blank_values() {
        let config = AppConfig::default()
            .with_base_url_override(Some("  ".to_string()))
            .with_base_url_override(None);
        assert_eq!(config, AppConfig::default());

        let config = AppConfig::default().with_base_url_override(Some("https://puzzles.example/".into()));
        assert_eq!(config.base_url(), "https://puzzles.example/");
    }

    #[test]
    fn test_error_records_location() {
        let error = ConfigError::new("boom");
        assert!(error.file.ends_with("config.rs"));
        assert!(error.to_string().starts_with("Config error: boom at "));
    }
}
