// SPDX-License-Identifier: MPL-2.0
//! This module handles the library's configuration, including loading and saving
//! feedback preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use bookaura_feedback::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Keep error toasts on screen a little longer
//! config.notifications.error_duration_ms = 8000;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.notifications.error_duration_ms, 8000);
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

mod defaults;

pub use defaults::*;

use crate::diagnostics::BufferCapacity;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "BookAura";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub diagnostics: DiagnosticsSettings,
}

/// Toast timing preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub default_duration_ms: u64,
    pub error_duration_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            default_duration_ms: DEFAULT_NOTIFICATION_DURATION_MS,
            error_duration_ms: DEFAULT_ERROR_NOTIFICATION_DURATION_MS,
        }
    }
}

impl NotificationSettings {
    #[must_use]
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    #[must_use]
    pub fn error_duration(&self) -> Duration {
        Duration::from_millis(self.error_duration_ms)
    }
}

/// Diagnostics buffer and fallback-message preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsSettings {
    pub buffer_capacity: usize,
    pub redact_fallback_body: bool,
    pub max_fallback_body_chars: usize,
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY,
            redact_fallback_body: DEFAULT_REDACT_FALLBACK_BODY,
            max_fallback_body_chars: DEFAULT_MAX_FALLBACK_BODY_CHARS,
        }
    }
}

impl DiagnosticsSettings {
    /// Returns the configured capacity, clamped to the supported range.
    #[must_use]
    pub fn capacity(&self) -> BufferCapacity {
        BufferCapacity::new(self.buffer_capacity)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("ignoring invalid settings at {}: {err}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_durations() {
        let config = Config {
            notifications: NotificationSettings {
                default_duration_ms: 2500,
                error_duration_ms: 9000,
            },
            diagnostics: DiagnosticsSettings {
                buffer_capacity: 250,
                redact_fallback_body: false,
                max_fallback_body_chars: 80,
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[notifications]\nerror_duration_ms = 7000\n")
            .expect("failed to write partial toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.notifications.error_duration_ms, 7000);
        assert_eq!(
            loaded.notifications.default_duration_ms,
            DEFAULT_NOTIFICATION_DURATION_MS
        );
        assert_eq!(loaded.diagnostics, DiagnosticsSettings::default());
    }

    #[test]
    fn load_from_missing_path_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn default_config_uses_documented_durations() {
        let config = Config::default();
        assert_eq!(
            config.notifications.default_duration(),
            Duration::from_millis(3000)
        );
        assert_eq!(
            config.notifications.error_duration(),
            Duration::from_millis(5000)
        );
    }

    #[test]
    fn diagnostics_capacity_is_clamped() {
        let settings = DiagnosticsSettings {
            buffer_capacity: 5,
            ..DiagnosticsSettings::default()
        };
        assert_eq!(settings.capacity().value(), MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    }
}
