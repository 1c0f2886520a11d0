//! Console command handlers

use std::sync::Arc;
use tracing::{error, info};

use crate::{
    services::{Settings, SettingsStore},
    state::{format_time, AppState, SessionKind, TimerState},
};
use super::{
    commands::Command,
    render::{help_text, status_report},
};

/// Outcome of handling one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub message: String,
    pub quit: bool,
}

impl Response {
    fn say(message: impl Into<String>) -> Self {
        Self { message: message.into(), quit: false }
    }

    fn quit() -> Self {
        Self { message: "Bye".to_string(), quit: true }
    }
}

/// Apply a console command to the timer
pub async fn handle_command(state: &Arc<AppState>, store: &SettingsStore, command: Command) -> Response {
    match command {
        Command::Start => {
            let snapshot = state.start();
            Response::say(format!("{} session running", snapshot.session_kind))
        }
        Command::Pause => {
            let snapshot = state.pause();
            Response::say(format!("Paused at {}", format_time(snapshot.remaining_seconds)))
        }
        Command::Reset => {
            let snapshot = state.reset();
            Response::say(format!("Reset to {}", format_time(snapshot.remaining_seconds)))
        }
        Command::Toggle => {
            let snapshot = state.toggle_session();
            Response::say(format!("Switched to {}", snapshot.session_kind))
        }
        Command::SwitchTo(kind) => {
            let snapshot = match kind {
                SessionKind::Work => state.switch_to_work(),
                SessionKind::Break => state.switch_to_break(),
            };
            Response::say(format!("Switched to {}", snapshot.session_kind))
        }
        Command::Adjust(kind, delta_seconds) => {
            let snapshot = match kind {
                SessionKind::Work => state.adjust_work_duration(delta_seconds),
                SessionKind::Break => state.adjust_break_duration(delta_seconds),
            };
            persist(store, &snapshot).await;
            Response::say(duration_message(kind, &snapshot))
        }
        Command::Set(kind, minutes) => {
            let seconds = minutes * 60;
            let snapshot = match kind {
                SessionKind::Work => state.set_work_duration(seconds),
                SessionKind::Break => state.set_break_duration(seconds),
            };
            persist(store, &snapshot).await;
            Response::say(duration_message(kind, &snapshot))
        }
        Command::Status => Response::say(status_report(state)),
        Command::Export(path) => {
            let settings = Settings::from_state(&state.snapshot());
            match store.export(&settings, &path).await {
                Ok(()) => Response::say(format!("Settings exported to {}", path.display())),
                Err(e) => {
                    error!("Failed to export settings: {}", e);
                    Response::say(format!("Export failed: {}", e))
                }
            }
        }
        Command::Help => Response::say(help_text()),
        Command::Quit => {
            info!("Quit requested from console");
            Response::quit()
        }
    }
}

fn duration_message(kind: SessionKind, snapshot: &TimerState) -> String {
    format!("{} duration is now {}", kind, format_time(snapshot.duration_of(kind)))
}

/// Save the configured durations; failures are logged, never fatal
pub async fn persist(store: &SettingsStore, snapshot: &TimerState) {
    if let Err(e) = store.save(&Settings::from_state(snapshot)).await {
        error!("Failed to save settings: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (Arc<AppState>, SettingsStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        (Arc::new(AppState::default()), store, dir)
    }

    #[tokio::test]
    async fn duration_changes_are_persisted() {
        let (state, store, _dir) = setup();

        let response = handle_command(&state, &store, Command::Set(SessionKind::Work, 30)).await;
        assert_eq!(response.message, "WORK duration is now 30:00");
        assert_eq!(state.snapshot().remaining_seconds, 1800);

        handle_command(&state, &store, Command::Adjust(SessionKind::Break, -600)).await;
        let saved = store.load().await.unwrap();
        assert_eq!(saved.work_duration_seconds, 1800);
        assert_eq!(saved.break_duration_seconds, 60);
    }

    #[tokio::test]
    async fn start_pause_and_switch_round_trip_through_state() {
        let (state, store, _dir) = setup();

        handle_command(&state, &store, Command::Start).await;
        assert!(state.snapshot().is_running);

        let response = handle_command(&state, &store, Command::Pause).await;
        assert_eq!(response.message, "Paused at 25:00");

        handle_command(&state, &store, Command::SwitchTo(SessionKind::Break)).await;
        assert_eq!(state.snapshot().session_kind, SessionKind::Break);
        assert!(!state.has_active_driver());
    }

    #[tokio::test]
    async fn export_reports_failures_without_quitting() {
        let (state, store, dir) = setup();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let response = handle_command(&state, &store, Command::Export(blocker.join("out.json"))).await;
        assert!(response.message.starts_with("Export failed"));
        assert!(!response.quit);

        let ok = handle_command(&state, &store, Command::Export(dir.path().join("out.json"))).await;
        assert!(ok.message.starts_with("Settings exported"));
    }

    #[tokio::test]
    async fn quit_sets_flag() {
        let (state, store, _dir) = setup();
        assert!(handle_command(&state, &store, Command::Quit).await.quit);
    }
}
