//! Focus Timer - A Pomodoro-style work/break countdown
//! 
//! This library provides the session timer state machine, the countdown
//! driver that feeds it, and the console and settings collaborators around it.

pub mod config;
pub mod state;
pub mod console;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, SessionKind, TimerState};
pub use utils::signals::shutdown_signal;
