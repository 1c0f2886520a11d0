//! Timer state structure and the session state machine
//!
//! `TimerState` is a plain value: every operation is a synchronous
//! transition with no clock attached. The countdown driver in
//! [`crate::tasks::countdown`] feeds it ticks; tests feed it ticks directly.

use serde::{Deserialize, Serialize};

use super::session::{SessionKind, DEFAULT_BREAK_SECONDS, DEFAULT_WORK_SECONDS};

/// Result of a single driver tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; the driver should stop firing
    Stopped,
    /// One second was taken off the countdown; keep firing
    Decremented,
    /// Countdown was already at zero; switched to the given (idle) session
    Transitioned(SessionKind),
}

impl TickOutcome {
    /// Whether the driver that produced this outcome should keep running
    pub fn keeps_driver(self) -> bool {
        matches!(self, TickOutcome::Decremented)
    }
}

/// Snapshot of the session timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub remaining_seconds: u64,
    pub is_running: bool,
    pub session_kind: SessionKind,
    pub work_duration_seconds: u64,
    pub break_duration_seconds: u64,
}

impl TimerState {
    /// Fresh idle work session with the default 25/5 minute durations
    pub fn new() -> Self {
        Self::with_durations(DEFAULT_WORK_SECONDS, DEFAULT_BREAK_SECONDS)
    }

    /// Idle work session seeded with the given durations, clamped into bounds
    pub fn with_durations(work_seconds: u64, break_seconds: u64) -> Self {
        let work_duration_seconds = SessionKind::Work.clamp_adjusted(work_seconds, 0);
        let break_duration_seconds = SessionKind::Break.clamp_adjusted(break_seconds, 0);
        Self {
            remaining_seconds: work_duration_seconds,
            is_running: false,
            session_kind: SessionKind::Work,
            work_duration_seconds,
            break_duration_seconds,
        }
    }

    /// Configured duration of the given session kind
    pub fn duration_of(&self, kind: SessionKind) -> u64 {
        match kind {
            SessionKind::Work => self.work_duration_seconds,
            SessionKind::Break => self.break_duration_seconds,
        }
    }

    /// Configured duration of the active session kind
    pub fn current_duration(&self) -> u64 {
        self.duration_of(self.session_kind)
    }

    /// Fraction of the current session still remaining, in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        let total = self.current_duration();
        if total == 0 {
            return 0.0;
        }
        (self.remaining_seconds as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn start(&mut self) {
        self.is_running = true;
    }

    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Refill the countdown for the current session and stop
    pub fn reset(&mut self) {
        self.remaining_seconds = self.current_duration();
        self.is_running = false;
    }

    /// One driver firing.
    ///
    /// The running check and the zero check both happen before any
    /// decrement, so a paused timer never loses a second and the countdown
    /// never underflows. Reaching zero switches to the idle form of the other
    /// session; the next session is not started automatically.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Stopped;
        }

        if self.remaining_seconds == 0 {
            self.toggle_session();
            return TickOutcome::Transitioned(self.session_kind);
        }

        self.remaining_seconds -= 1;
        TickOutcome::Decremented
    }

    /// Shift the work duration by `delta_seconds`, clamped to 5..=60 minutes.
    ///
    /// While idle in a work session the countdown is refilled to the new
    /// duration. While running it is left alone, except that it is capped to
    /// the new duration when shrinking would leave it above it, so remaining
    /// time never exceeds the active session's length.
    pub fn adjust_work_duration(&mut self, delta_seconds: i64) {
        self.adjust_duration(SessionKind::Work, delta_seconds);
    }

    /// Shift the break duration by `delta_seconds`, clamped to 1..=30 minutes.
    ///
    /// Same countdown rules as [`TimerState::adjust_work_duration`], applied
    /// to break sessions.
    pub fn adjust_break_duration(&mut self, delta_seconds: i64) {
        self.adjust_duration(SessionKind::Break, delta_seconds);
    }

    /// Set an absolute work duration (picker style), still clamped
    pub fn set_work_duration(&mut self, seconds: u64) {
        let delta = seconds as i64 - self.work_duration_seconds as i64;
        self.adjust_work_duration(delta);
    }

    /// Set an absolute break duration (picker style), still clamped
    pub fn set_break_duration(&mut self, seconds: u64) {
        let delta = seconds as i64 - self.break_duration_seconds as i64;
        self.adjust_break_duration(delta);
    }

    fn adjust_duration(&mut self, kind: SessionKind, delta_seconds: i64) {
        let updated = kind.clamp_adjusted(self.duration_of(kind), delta_seconds);
        match kind {
            SessionKind::Work => self.work_duration_seconds = updated,
            SessionKind::Break => self.break_duration_seconds = updated,
        }

        if self.session_kind != kind {
            return;
        }
        if !self.is_running {
            // Keep the idle countdown in sync with the edited duration
            self.remaining_seconds = updated;
        } else if self.remaining_seconds > updated {
            // A running countdown is left alone unless it would exceed the new duration
            self.remaining_seconds = updated;
        }
    }

    pub fn switch_to_break(&mut self) {
        self.switch_to(SessionKind::Break);
    }

    pub fn switch_to_work(&mut self) {
        self.switch_to(SessionKind::Work);
    }

    pub fn toggle_session(&mut self) {
        self.switch_to(self.session_kind.toggled());
    }

    fn switch_to(&mut self, kind: SessionKind) {
        self.session_kind = kind;
        self.remaining_seconds = self.duration_of(kind);
        self.is_running = false;
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format seconds as zero-padded `MM:SS`
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
