use std::{sync::Arc, time::Duration};

use focus_timer::{
    services::{Settings, SettingsStore},
    AppState, SessionKind, TimerState,
};
use tokio::time::sleep;

fn fresh() -> Arc<AppState> {
    Arc::new(AppState::new(TimerState::new()))
}

#[tokio::test(start_paused = true)]
async fn work_session_runs_out_into_idle_break() {
    let state = fresh();
    state.start();

    sleep(Duration::from_millis(1_499_500)).await;
    let snapshot = state.snapshot();
    assert_eq!(snapshot.remaining_seconds, 1);
    assert!(snapshot.is_running);

    // Tick 1500 shows 00:00, the next one hands over to the break
    sleep(Duration::from_secs(2)).await;
    let snapshot = state.snapshot();
    assert_eq!(snapshot.session_kind, SessionKind::Break);
    assert_eq!(snapshot.remaining_seconds, 300);
    assert!(!snapshot.is_running);
    assert!(!state.has_active_driver());

    // The break is armed, not started
    sleep(Duration::from_secs(10)).await;
    assert_eq!(state.snapshot().remaining_seconds, 300);
}

#[tokio::test]
async fn clamped_adjustment_syncs_idle_countdown() {
    let state = fresh();
    let snapshot = state.adjust_work_duration(-2000);
    assert_eq!(snapshot.work_duration_seconds, 300);
    assert_eq!(snapshot.remaining_seconds, 300);
}

#[tokio::test(start_paused = true)]
async fn ticks_after_pause_do_not_decrement() {
    let state = fresh();
    state.start();
    sleep(Duration::from_millis(10_500)).await;
    assert_eq!(state.snapshot().remaining_seconds, 1490);

    state.pause();
    sleep(Duration::from_secs(5)).await;
    assert_eq!(state.snapshot().remaining_seconds, 1490);

    // Resuming picks up where it left off at one second per tick
    state.start();
    sleep(Duration::from_millis(2_500)).await;
    assert_eq!(state.snapshot().remaining_seconds, 1488);
}

#[tokio::test(start_paused = true)]
async fn switching_to_break_while_running_stops_the_countdown() {
    let state = fresh();
    state.start();
    sleep(Duration::from_millis(3_500)).await;

    let snapshot = state.switch_to_break();
    assert_eq!(snapshot.session_kind, SessionKind::Break);
    assert_eq!(snapshot.remaining_seconds, 300);
    assert!(!snapshot.is_running);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(state.snapshot(), snapshot);
}

#[tokio::test(start_paused = true)]
async fn reset_refills_break_and_keeps_kind() {
    let state = fresh();
    state.switch_to_break();
    state.start();
    sleep(Duration::from_millis(180_500)).await;
    assert_eq!(state.snapshot().remaining_seconds, 120);

    let snapshot = state.reset();
    assert_eq!(snapshot.remaining_seconds, 300);
    assert!(!snapshot.is_running);
    assert_eq!(snapshot.session_kind, SessionKind::Break);
}

#[tokio::test(start_paused = true)]
async fn many_starts_still_tick_once_per_second() {
    let state = fresh();
    for _ in 0..5 {
        state.start();
    }

    sleep(Duration::from_millis(4_500)).await;
    assert_eq!(state.snapshot().remaining_seconds, 1496);
}

#[tokio::test]
async fn saved_durations_seed_the_next_run() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.json"));

    let first = fresh();
    first.set_work_duration(50 * 60);
    first.adjust_break_duration(300);
    store.save(&Settings::from_state(&first.snapshot())).await.unwrap();

    let second = AppState::new(store.load().await.unwrap().to_timer_state());
    let snapshot = second.snapshot();
    assert_eq!(snapshot.work_duration_seconds, 3000);
    assert_eq!(snapshot.break_duration_seconds, 600);
    assert_eq!(snapshot.remaining_seconds, 3000);
    assert_eq!(snapshot.session_kind, SessionKind::Work);
}
