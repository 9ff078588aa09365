//! Loading and saving preferences in the platform config directory.

use std::path::PathBuf;

use directories::ProjectDirs;
use log::warn;

use super::EditorPreferences;

const PREFERENCES_FILE: &str = "preferences.json";

/// Errors from preference file operations.
#[derive(Debug)]
pub enum PreferencesError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    NoConfigDir,
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::IoError(e) => write!(f, "IO error: {}", e),
            PreferencesError::ParseError(e) => write!(f, "Parse error: {}", e),
            PreferencesError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            PreferencesError::NoConfigDir => {
                write!(f, "no platform config directory available")
            }
        }
    }
}

impl std::error::Error for PreferencesError {}

fn preferences_path() -> Option<PathBuf> {
    ProjectDirs::from("io", "tilesmith", "tilesmith")
        .map(|dirs| dirs.config_dir().join(PREFERENCES_FILE))
}

impl EditorPreferences {
    /// Loads preferences, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load() -> Self {
        let Some(path) = preferences_path() else {
            warn!("No config directory available, using default preferences");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(preferences) => preferences,
                Err(e) => {
                    warn!("Failed to parse preferences ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read preferences ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Saves preferences, creating the config directory as needed.
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = preferences_path().ok_or(PreferencesError::NoConfigDir)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| PreferencesError::IoError(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PreferencesError::SerializeError(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| PreferencesError::IoError(e.to_string()))?;
        Ok(())
    }
}
