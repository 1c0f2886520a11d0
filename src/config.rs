//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;
use tracing::warn;

use crate::services::{Settings, SettingsError, SettingsStore};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focus-timer")]
#[command(about = "A Pomodoro-style focus timer with work and break sessions")]
#[command(version)]
pub struct Config {
    /// Work session length in minutes (5-60), overrides saved settings
    #[arg(short, long)]
    pub work_minutes: Option<u64>,

    /// Break length in minutes (1-30), overrides saved settings
    #[arg(short, long)]
    pub break_minutes: Option<u64>,

    /// Settings file to load and save durations
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Start the first work session immediately
    #[arg(long)]
    pub start: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Settings file location: explicit, platform default, or the working directory
    pub fn settings_path(&self) -> PathBuf {
        match &self.settings {
            Some(path) => path.clone(),
            None => local_fallback(SettingsStore::default_path()),
        }
    }

    /// Layer command-line durations over persisted ones
    pub fn apply_overrides(&self, settings: Settings) -> Settings {
        Settings {
            work_duration_seconds: self
                .work_minutes
                .map_or(settings.work_duration_seconds, |m| m.saturating_mul(60)),
            break_duration_seconds: self
                .break_minutes
                .map_or(settings.break_duration_seconds, |m| m.saturating_mul(60)),
        }
        .clamped()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Used when the platform has no configuration directory
pub const LOCAL_SETTINGS_FILE: &str = "focus-timer-settings.json";

fn local_fallback(platform: Result<PathBuf, SettingsError>) -> PathBuf {
    platform.unwrap_or_else(|e| {
        warn!("{}, keeping settings in {}", e, LOCAL_SETTINGS_FILE);
        PathBuf::from(LOCAL_SETTINGS_FILE)
    })
}
