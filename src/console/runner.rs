//! Console input loop

use std::{future::Future, io, sync::Arc};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info};

use crate::{services::SettingsStore, state::AppState};
use super::{
    commands::{Command, CommandError},
    handlers::handle_command,
};

/// Feed console lines into the timer until `quit` or a shutdown signal.
///
/// Closed input only stops reading; the countdown keeps running until the
/// shutdown future resolves. A shutdown future that fails is disarmed the
/// same way, leaving `quit` as the way out.
pub async fn run_console<R, S>(state: &Arc<AppState>, store: &SettingsStore, input: R, shutdown: S)
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = io::Result<()>>,
{
    let mut lines = input.lines();
    tokio::pin!(shutdown);
    let mut input_open = true;
    let mut signals_armed = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line {
                    Ok(Some(line)) => match Command::parse(&line) {
                        Ok(command) => {
                            let response = handle_command(state, store, command).await;
                            println!("\r\x1b[K{}", response.message);
                            if response.quit {
                                break;
                            }
                        }
                        Err(CommandError::Empty) => {}
                        Err(e) => println!("\r\x1b[K{}", e),
                    },
                    Ok(None) => {
                        info!("Input closed, waiting for a shutdown signal");
                        input_open = false;
                    }
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        input_open = false;
                    }
                }
            }

            result = &mut shutdown, if signals_armed => {
                if let Err(e) = result {
                    // Keep serving the console; `quit` still exits cleanly
                    error!("Signal handler unavailable: {}", e);
                    signals_armed = false;
                    continue;
                }
                info!("Shutdown signal received");
                break;
            }

            else => {
                error!("No input and no signal handler left, shutting down");
                break;
            }
        }
    }
}
