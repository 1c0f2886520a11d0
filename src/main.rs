//! Focus Timer - A Pomodoro-style work/break countdown
//!
//! This is the main entry point for the focus-timer application.

use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};

use focus_timer::{
    config::Config,
    console::{persist, render::help_text, run_console},
    services::{Settings, SettingsStore},
    state::AppState,
    tasks::render_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so they stay out of the status line
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting focus-timer v{}", env!("CARGO_PKG_VERSION"));

    let store = SettingsStore::new(config.settings_path());

    let saved = match store.load().await {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Ignoring unreadable settings: {}", e);
            Settings::default()
        }
    };
    let settings = config.apply_overrides(saved);
    info!(
        "Configuration: work={}s, break={}s, settings={}",
        settings.work_duration_seconds,
        settings.break_duration_seconds,
        store.path().display()
    );

    // Create application state
    let state = Arc::new(AppState::new(settings.to_timer_state()));

    println!("{}", help_text());

    // Start the status line redraw task
    let render_state = Arc::clone(&state);
    tokio::spawn(async move {
        render_task(render_state).await;
    });

    if config.start {
        state.start();
    }

    run_console(&state, &store, BufReader::new(tokio::io::stdin()), shutdown_signal()).await;

    let snapshot = state.pause();
    persist(&store, &snapshot).await;

    println!();
    info!("focus-timer shutdown complete");
    Ok(())
}
