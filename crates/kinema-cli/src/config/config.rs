//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// API request settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// UI settings.
    #[serde(default)]
    pub ui: UiConfig,
    /// Slideshow settings.
    #[serde(default)]
    pub slideshow: SlideshowConfig,
}

/// API request configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Response language (BCP 47, e.g. "en-US").
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

/// UI configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiConfig {
    /// Color theme preference.
    #[serde(default)]
    pub theme: Theme,
}

/// Slideshow configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlideshowConfig {
    /// Autoplay interval in milliseconds.
    #[serde(default = "default_slideshow_interval_ms")]
    pub interval_ms: u64,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_slideshow_interval_ms(),
        }
    }
}

/// Light/dark theme preference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light terminal palette.
    Light,
    /// Dark terminal palette.
    #[default]
    Dark,
}

/// Default response language.
fn default_language() -> String {
    String::from("en-US")
}

/// Default slideshow autoplay interval (5s).
const fn default_slideshow_interval_ms() -> u64 {
    5000
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.api.language, "en-US");
        assert_eq!(config.ui.theme, Theme::Dark);
        assert_eq!(config.slideshow.interval_ms, 5000);
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        // Arrange
        let config = AppConfig {
            api: ApiConfig {
                language: String::from("de-DE"),
            },
            ui: UiConfig {
                theme: Theme::Light,
            },
            slideshow: SlideshowConfig { interval_ms: 8000 },
        };

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        // Assert
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let toml_str = toml::to_string_pretty(&config).unwrap();

        // Assert
        assert!(toml_str.contains("theme = \"dark\""));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let path = Path::new("/tmp/kinema_test_nonexistent_config.toml");

        // Act
        let config = AppConfig::load(path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = AppConfig {
            api: ApiConfig {
                language: String::from("ja-JP"),
            },
            ui: UiConfig {
                theme: Theme::Light,
            },
            slideshow: SlideshowConfig::default(),
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\ntheme = \"light\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.ui.theme, Theme::Light);
        assert_eq!(config.api.language, "en-US");
    }
}
