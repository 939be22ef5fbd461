//! Application settings persistence for Drafy.
//!
//! Stores user preferences (theme, database location, encyclopedia endpoint)
//! in a JSON file at an OS-appropriate location.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// Encyclopedia endpoint used when none is configured.
pub const DEFAULT_ENCYCLOPEDIA_URL: &str = "https://id.wikipedia.org/w/";

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Whether the dark theme is active.
    pub dark_mode: bool,
    /// SQLite file holding the notes.
    pub database_path: String,
    /// Base URL of the MediaWiki API used for lookups.
    pub encyclopedia_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            database_path: default_database_path().to_string_lossy().to_string(),
            encyclopedia_url: DEFAULT_ENCYCLOPEDIA_URL.to_string(),
        }
    }
}

impl AppSettings {
    /// Flips the theme and returns the new `dark_mode` value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }
}

/// Returns the path to the settings JSON file.
///
/// - macOS / Linux: `~/.config/drafy/settings.json`
/// - Windows: `%APPDATA%/Drafy/settings.json`
pub fn settings_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("Drafy").join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("drafy").join("settings.json")
    }
}

/// Returns the default notes database: `<data dir>/drafy/drafy.db`.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
        })
        .join("drafy")
        .join("drafy.db")
}

/// Loads settings from the default location.
pub fn load_settings() -> AppSettings {
    load_settings_from(settings_file_path())
}

/// Loads settings from `path`; returns defaults if the file is missing or corrupt.
pub fn load_settings_from<P: AsRef<Path>>(path: P) -> AppSettings {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable settings file {}: {e}", path.display());
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

/// Saves settings to the default location.
pub fn save_settings(settings: &AppSettings) -> Result<()> {
    save_settings_to(settings_file_path(), settings)
}

/// Saves settings to `path`, creating parent directories as needed.
pub fn save_settings_to<P: AsRef<Path>>(path: P, settings: &AppSettings) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    log::info!("saved settings to {}", path.display());
    Ok(())
}

/// Toggles the stored theme preference at `path` and returns the new value.
pub fn toggle_dark_mode_at<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    let mut settings = load_settings_from(path);
    let dark = settings.toggle_dark_mode();
    save_settings_to(path, &settings)?;
    Ok(dark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(dir.path().join("absent.json"));
        assert_eq!(settings, AppSettings::default());
        assert!(!settings.dark_mode);
        assert_eq!(settings.encyclopedia_url, DEFAULT_ENCYCLOPEDIA_URL);
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json at all").unwrap();
        assert_eq!(load_settings_from(&path), AppSettings::default());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"darkMode":true}"#).unwrap();

        let settings = load_settings_from(&path);
        assert!(settings.dark_mode);
        assert_eq!(settings.encyclopedia_url, DEFAULT_ENCYCLOPEDIA_URL);
    }

    #[test]
    fn test_save_and_load_roundtrip_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            dark_mode: true,
            database_path: "/tmp/notes.db".to_string(),
            encyclopedia_url: "https://en.wikipedia.org/w/".to_string(),
        };

        save_settings_to(&path, &settings).unwrap();
        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn test_toggle_dark_mode_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        assert!(toggle_dark_mode_at(&path).unwrap());
        assert!(load_settings_from(&path).dark_mode);
        assert!(!toggle_dark_mode_at(&path).unwrap());
        assert!(!load_settings_from(&path).dark_mode);
    }
}
