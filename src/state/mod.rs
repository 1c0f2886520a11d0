//! State management module
//! 
//! This module contains the session timer state machine and the shared
//! handle through which it is driven.

pub mod session;
pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use session::SessionKind;
pub use app_state::AppState;
pub use timer_state::{format_time, TickOutcome, TimerState};
