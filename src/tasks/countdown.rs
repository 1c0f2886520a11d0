//! Countdown driver background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::state::AppState;

/// Interval between countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic driver that feeds ticks into the session timer.
///
/// The first tick fires one period after arming. The task returns as soon as
/// a tick does not decrement, which covers pausing, session transitions and
/// being superseded by a newer driver.
pub async fn countdown_driver_task(state: Arc<AppState>, generation: u64) {
    debug!("Countdown driver {} armed", generation);

    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let outcome = state.driver_tick(generation);
        if !outcome.keeps_driver() {
            debug!("Countdown driver {} finished: {:?}", generation, outcome);
            break;
        }
    }
}
