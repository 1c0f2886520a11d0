//! Persisted timer preferences

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

use crate::state::{
    session::{DEFAULT_BREAK_SECONDS, DEFAULT_WORK_SECONDS},
    SessionKind, TimerState,
};

const APP_DIR: &str = "focus-timer";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine a configuration directory for this platform")]
    NoConfigDir,
}

/// Durations that survive restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_work")]
    pub work_duration_seconds: u64,
    #[serde(default = "default_break")]
    pub break_duration_seconds: u64,
}

fn default_work() -> u64 {
    DEFAULT_WORK_SECONDS
}

fn default_break() -> u64 {
    DEFAULT_BREAK_SECONDS
}

impl Settings {
    /// Capture the configured durations from a timer snapshot
    pub fn from_state(state: &TimerState) -> Self {
        Self {
            work_duration_seconds: state.work_duration_seconds,
            break_duration_seconds: state.break_duration_seconds,
        }
    }

    /// Bring hand-edited values back into the allowed ranges
    pub fn clamped(self) -> Self {
        Self {
            work_duration_seconds: SessionKind::Work.clamp_adjusted(self.work_duration_seconds, 0),
            break_duration_seconds: SessionKind::Break.clamp_adjusted(self.break_duration_seconds, 0),
        }
    }

    /// Idle work session seeded with these durations
    pub fn to_timer_state(self) -> TimerState {
        TimerState::with_durations(self.work_duration_seconds, self.break_duration_seconds)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_duration_seconds: DEFAULT_WORK_SECONDS,
            break_duration_seconds: DEFAULT_BREAK_SECONDS,
        }
    }
}

/// JSON file store for [`Settings`]
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/focus-timer/settings.json`
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when no file exists yet
    pub async fn load(&self) -> Result<Settings, SettingsError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", self.path.display());
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(SettingsError::Io { path: self.path.clone(), source });
            }
        };

        let settings: Settings = serde_json::from_str(&raw)?;
        info!("Loaded settings from {}", self.path.display());
        Ok(settings.clamped())
    }

    pub async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        write_json(&self.path, settings).await?;
        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }

    /// Write the given settings to an arbitrary file
    pub async fn export(&self, settings: &Settings, destination: &Path) -> Result<(), SettingsError> {
        write_json(destination, settings).await?;
        info!("Exported settings to {}", destination.display());
        Ok(())
    }
}

async fn write_json(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let io_err = |source: std::io::Error| SettingsError::Io { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).await.map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn save_then_load_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));
        let settings = Settings { work_duration_seconds: 2700, break_duration_seconds: 600 };

        store.save(&settings).await.unwrap();
        assert_eq!(store.load().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn out_of_range_values_are_clamped_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"work_duration_seconds": 10, "break_duration_seconds": 99999}"#).unwrap();

        let loaded = SettingsStore::new(&path).load().await.unwrap();
        assert_eq!(loaded.work_duration_seconds, 300);
        assert_eq!(loaded.break_duration_seconds, 1800);
    }

    #[tokio::test]
    async fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"break_duration_seconds": 120}"#).unwrap();

        let loaded = SettingsStore::new(&path).load().await.unwrap();
        assert_eq!(loaded.work_duration_seconds, DEFAULT_WORK_SECONDS);
        assert_eq!(loaded.break_duration_seconds, 120);
    }

    #[tokio::test]
    async fn malformed_file_is_a_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        let err = SettingsStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[tokio::test]
    async fn export_writes_pretty_json() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        let destination = dir.path().join("export.json");

        store.export(&Settings::default(), &destination).await.unwrap();
        let written = std::fs::read_to_string(&destination).unwrap();
        assert!(written.contains("\"work_duration_seconds\": 1500"));
        assert!(!store.path().exists());
    }
}
