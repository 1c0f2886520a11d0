//! Text rendering of timer snapshots

use crate::state::{format_time, AppState, TimerState};

/// One-line countdown display, e.g. `[WORK] 24:59 running (99.9% left)`
pub fn status_line(state: &TimerState) -> String {
    format!(
        "[{}] {} {} ({:.1}% left)",
        state.session_kind,
        format_time(state.remaining_seconds),
        if state.is_running { "running" } else { "paused" },
        state.progress() * 100.0,
    )
}

/// Multi-line report for the `status` command
pub fn status_report(app: &AppState) -> String {
    let state = app.snapshot();
    let (last_action, last_action_time) = app.get_last_action();

    let mut report = vec![
        status_line(&state),
        format!("  work duration:  {}", format_time(state.work_duration_seconds)),
        format!("  break duration: {}", format_time(state.break_duration_seconds)),
        format!("  uptime:         {}", app.get_uptime()),
    ];
    if let (Some(action), Some(at)) = (last_action, last_action_time) {
        report.push(format!("  last action:    {} at {}", action, at.format("%H:%M:%S")));
    }
    report.join("\n")
}

/// Command reference shown at startup and by `help`
pub fn help_text() -> &'static str {
    "Commands:
  start | s            start or resume the countdown
  pause | p            pause the countdown
  reset | r            refill the current session
  toggle | t           switch between work and break
  work | break         switch to that session
  work +N | work -N    adjust work duration by N minutes
  break +N | break -N  adjust break duration by N minutes
  set work|break N     set a duration to N minutes (1-60)
  status               show timer details
  export PATH          write current settings to PATH as JSON
  help                 show this help
  quit | q             save settings and exit"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_shows_kind_time_and_progress() {
        let mut state = TimerState::new();
        assert_eq!(status_line(&state), "[WORK] 25:00 paused (100.0% left)");

        state.switch_to_break();
        state.start();
        state.tick();
        assert_eq!(status_line(&state), "[BREAK] 04:59 running (99.7% left)");
    }

    #[test]
    fn status_report_includes_durations_and_last_action() {
        let app = AppState::default();
        app.adjust_break_duration(60);

        let report = status_report(&app);
        assert!(report.starts_with("[WORK] 25:00 paused"));
        assert!(report.contains("break duration: 06:00"));
        assert!(report.contains("last action:    adjust-break"));
    }
}
