//! Status line redraw task

use std::sync::Arc;
use tokio::io::{self, AsyncWriteExt};
use tracing::{debug, warn};

use crate::{console::render::status_line, state::AppState};

/// Redraw the status line in place whenever the timer publishes a snapshot
pub async fn render_task(state: Arc<AppState>) {
    let mut timer_rx = state.subscribe();
    let mut stdout = io::stdout();

    loop {
        let line = {
            let snapshot = timer_rx.borrow_and_update();
            status_line(&snapshot)
        };

        let redraw = format!("\r\x1b[K{}", line);
        if let Err(e) = stdout.write_all(redraw.as_bytes()).await {
            warn!("Failed to draw status line: {}", e);
            break;
        }
        if let Err(e) = stdout.flush().await {
            warn!("Failed to flush status line: {}", e);
            break;
        }

        if timer_rx.changed().await.is_err() {
            debug!("Timer channel closed, stopping render task");
            break;
        }
    }
}
