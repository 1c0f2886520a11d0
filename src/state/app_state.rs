//! Main application state management
//!
//! `AppState` is the only sanctioned way to mutate the session timer. It
//! wraps the pure [`TimerState`] machine with the countdown driver slot,
//! change notifications for the presentation layer, and last-action tracking.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info};

use super::{SessionKind, TickOutcome, TimerState};
use crate::tasks::countdown_driver_task;

/// A registered countdown driver
#[derive(Debug)]
struct Driver {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Shared handle over the session timer
#[derive(Debug)]
pub struct AppState {
    /// Session timer state machine
    timer_state: Mutex<TimerState>,
    /// The at-most-one live countdown driver
    driver: Mutex<Option<Driver>>,
    next_generation: AtomicU64,
    /// Process metadata
    pub start_time: Instant,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for timer updates
    timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState around an initial timer state
    pub fn new(initial: TimerState) -> Self {
        let (timer_update_tx, timer_update_rx) = watch::channel(initial.clone());

        Self {
            timer_state: Mutex::new(initial),
            driver: Mutex::new(None),
            next_generation: AtomicU64::new(0),
            start_time: Instant::now(),
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Read-only snapshot of the timer for rendering
    pub fn snapshot(&self) -> TimerState {
        lock(&self.timer_state).clone()
    }

    /// Subscribe to a fresh snapshot after every mutation
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Whether a countdown driver is currently registered
    pub fn has_active_driver(&self) -> bool {
        lock(&self.driver).is_some()
    }

    /// Start counting down.
    ///
    /// Any driver registered by an earlier start is cancelled before the new
    /// one is spawned, so repeated starts never stack decrements. Must be
    /// called from within a tokio runtime.
    pub fn start(self: &Arc<Self>) -> TimerState {
        let snapshot = self.update_timer("start", TimerState::start);

        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut driver = lock(&self.driver);
        if let Some(previous) = driver.take() {
            debug!("Replacing countdown driver {} with {}", previous.generation, generation);
            previous.handle.abort();
        }
        let handle = tokio::spawn(countdown_driver_task(Arc::clone(self), generation));
        *driver = Some(Driver { generation, handle });

        info!("Timer started: {} with {}s remaining", snapshot.session_kind, snapshot.remaining_seconds);
        snapshot
    }

    /// Stop counting down, keeping the remaining time
    pub fn pause(&self) -> TimerState {
        let snapshot = self.update_timer("pause", TimerState::pause);
        self.cancel_driver();
        info!("Timer paused at {}s", snapshot.remaining_seconds);
        snapshot
    }

    /// Refill the current session and stop
    pub fn reset(&self) -> TimerState {
        let snapshot = self.update_timer("reset", TimerState::reset);
        self.cancel_driver();
        info!("Timer reset: {} {}s", snapshot.session_kind, snapshot.remaining_seconds);
        snapshot
    }

    pub fn adjust_work_duration(&self, delta_seconds: i64) -> TimerState {
        let snapshot = self.update_timer("adjust-work", |t| t.adjust_work_duration(delta_seconds));
        info!("Work duration adjusted by {}s to {}s", delta_seconds, snapshot.work_duration_seconds);
        snapshot
    }

    pub fn adjust_break_duration(&self, delta_seconds: i64) -> TimerState {
        let snapshot = self.update_timer("adjust-break", |t| t.adjust_break_duration(delta_seconds));
        info!("Break duration adjusted by {}s to {}s", delta_seconds, snapshot.break_duration_seconds);
        snapshot
    }

    /// Set the work duration to an absolute value, as the duration picker does
    pub fn set_work_duration(&self, seconds: u64) -> TimerState {
        let snapshot = self.update_timer("set-work", |t| t.set_work_duration(seconds));
        info!("Work duration set to {}s", snapshot.work_duration_seconds);
        snapshot
    }

    /// Set the break duration to an absolute value, as the duration picker does
    pub fn set_break_duration(&self, seconds: u64) -> TimerState {
        let snapshot = self.update_timer("set-break", |t| t.set_break_duration(seconds));
        info!("Break duration set to {}s", snapshot.break_duration_seconds);
        snapshot
    }

    pub fn switch_to_work(&self) -> TimerState {
        self.switch_session("work", TimerState::switch_to_work)
    }

    pub fn switch_to_break(&self) -> TimerState {
        self.switch_session("break", TimerState::switch_to_break)
    }

    pub fn toggle_session(&self) -> TimerState {
        self.switch_session("toggle", TimerState::toggle_session)
    }

    fn switch_session(&self, action: &str, switch: fn(&mut TimerState)) -> TimerState {
        let snapshot = self.update_timer(action, switch);
        self.cancel_driver();
        info!("Switched to {} session ({}s)", snapshot.session_kind, snapshot.remaining_seconds);
        snapshot
    }

    /// Apply one tick on behalf of the driver with the given generation.
    ///
    /// A driver that is no longer the registered one is stale: its tick is a
    /// no-op and it is told to stop.
    pub fn driver_tick(&self, generation: u64) -> TickOutcome {
        let mut driver = lock(&self.driver);
        let is_current = driver.as_ref().is_some_and(|d| d.generation == generation);
        if !is_current {
            debug!("Ignoring tick from stale countdown driver {}", generation);
            return TickOutcome::Stopped;
        }

        let (outcome, snapshot) = {
            let mut timer = lock(&self.timer_state);
            let outcome = timer.tick();
            if outcome != TickOutcome::Stopped {
                self.publish(&timer);
            }
            (outcome, timer.clone())
        };

        if !outcome.keeps_driver() {
            // The task exits on its own once it sees the outcome
            driver.take();
        }
        drop(driver);

        match outcome {
            TickOutcome::Decremented => {
                debug!("Tick: {}s remaining", snapshot.remaining_seconds);
            }
            TickOutcome::Transitioned(kind) => {
                info!("{} session finished, {} session ready", kind.toggled(), kind);
                self.record_action(match kind {
                    SessionKind::Work => "auto-work",
                    SessionKind::Break => "auto-break",
                });
            }
            TickOutcome::Stopped => {
                debug!("Countdown driver {} observed a stopped timer", generation);
            }
        }

        outcome
    }

    /// Apply a mutation to the timer, record it and notify watchers
    fn update_timer<F>(&self, action: &str, updater: F) -> TimerState
    where
        F: FnOnce(&mut TimerState),
    {
        let mut timer = lock(&self.timer_state);
        updater(&mut timer);
        self.publish(&timer);
        let snapshot = timer.clone();
        drop(timer);

        self.record_action(action);
        snapshot
    }

    fn cancel_driver(&self) {
        if let Some(driver) = lock(&self.driver).take() {
            debug!("Cancelling countdown driver {}", driver.generation);
            driver.handle.abort();
        }
    }

    /// Must be called with the timer lock held, so watchers see snapshots in
    /// the same order the mutations happened.
    fn publish(&self, timer: &TimerState) {
        self.timer_update_tx.send_replace(timer.clone());
    }

    fn record_action(&self, action: &str) {
        *lock(&self.last_action) = Some(action.to_string());
        *lock(&self.last_action_time) = Some(Utc::now());
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = lock(&self.last_action).clone();
        let last_action_time = *lock(&self.last_action_time);
        (last_action, last_action_time)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TimerState::new())
    }
}

/// Every mutation leaves the guarded value consistent, so a poisoned lock is
/// still safe to read through.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
