// src/config/settings.rs
//
// User settings for the import pipeline
//
// Stored as JSON in the user config directory:
// {CONFIG_DIR}/mediatrack/settings.json
//
// Environment variables TMDB_API_KEY / OMDB_API_KEY override the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::WatchStatus;
use crate::error::{AppError, AppResult};

pub const TMDB_KEY_ENV: &str = "TMDB_API_KEY";
pub const OMDB_KEY_ENV: &str = "OMDB_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Primary provider key. Required to start an import.
    pub tmdb_api_key: Option<String>,

    /// Secondary provider key. Without it the fallback lookup is disabled.
    pub omdb_api_key: Option<String>,

    /// Result language passed to the primary provider
    pub language: String,

    /// Pause after each resolved entry
    pub courtesy_delay_ms: u64,

    pub request_timeout_secs: u64,

    /// Status given to imported items
    pub default_status: WatchStatus,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            omdb_api_key: None,
            language: "de-DE".to_string(),
            courtesy_delay_ms: 100,
            request_timeout_secs: 30,
            default_status: WatchStatus::Planned,
        }
    }
}

impl ImportSettings {
    /// Load from the default location, then apply environment overrides
    pub fn load() -> AppResult<Self> {
        let path = get_settings_path()?;
        let settings = Self::load_from(&path)?;
        Ok(settings.with_env_overrides(|name| std::env::var(name).ok()))
    }

    /// Load from a file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let settings: ImportSettings = serde_json::from_str(&raw)?;
        Ok(settings)
    }

    pub fn save(&self) -> AppResult<()> {
        let path = get_settings_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// Non-empty environment values replace the stored keys
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(TMDB_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.tmdb_api_key = Some(key);
        }
        if let Some(key) = lookup(OMDB_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.omdb_api_key = Some(key);
        }
        self
    }

    /// The primary key, or a configuration error
    pub fn require_tmdb_key(&self) -> AppResult<&str> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::Configuration("TMDB API key is missing".to_string()))
    }

    pub fn omdb_key(&self) -> Option<&str> {
        self.omdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn courtesy_delay(&self) -> Duration {
        Duration::from_millis(self.courtesy_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// {CONFIG_DIR}/mediatrack/settings.json
pub fn get_settings_path() -> AppResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| AppError::Other("Could not determine config directory".to_string()))?;

    Ok(config_dir.join("mediatrack").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = ImportSettings::load_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, ImportSettings::default());
        assert_eq!(settings.courtesy_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = ImportSettings {
            tmdb_api_key: Some("tmdb".to_string()),
            language: "en-US".to_string(),
            ..ImportSettings::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = ImportSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "omdb_api_key": "abc" }"#).unwrap();

        let loaded = ImportSettings::load_from(&path).unwrap();
        assert_eq!(loaded.omdb_key(), Some("abc"));
        assert_eq!(loaded.language, "de-DE");
    }

    #[test]
    fn test_env_overrides_win() {
        let settings = ImportSettings {
            tmdb_api_key: Some("from-file".to_string()),
            ..ImportSettings::default()
        };

        let overridden = settings.with_env_overrides(|name| match name {
            TMDB_KEY_ENV => Some("from-env".to_string()),
            OMDB_KEY_ENV => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(overridden.require_tmdb_key().unwrap(), "from-env");
        assert_eq!(overridden.omdb_key(), None);
    }

    #[test]
    fn test_blank_primary_key_is_configuration_error() {
        let settings = ImportSettings {
            tmdb_api_key: Some("  ".to_string()),
            ..ImportSettings::default()
        };
        assert!(matches!(settings.require_tmdb_key(), Err(AppError::Configuration(_))));
    }
}
